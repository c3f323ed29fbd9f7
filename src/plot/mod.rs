//! Terminal plotting of the skydip fit.

pub mod ascii;

pub use ascii::*;

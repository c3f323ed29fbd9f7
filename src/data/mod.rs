//! Synthetic skydip data.

pub mod sample;

pub use sample::*;

//! Mathematical utilities: run statistics, airmass, and weighted least squares.

pub mod airmass;
pub mod ols;
pub mod stats;

pub use airmass::*;
pub use ols::*;
pub use stats::*;

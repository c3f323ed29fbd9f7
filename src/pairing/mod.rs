//! HOT/SKY pairing.
//!
//! Turns the run sequence into airmass points: each SKY run is calibrated
//! against the most recent HOT run.

pub mod reducer;

pub use reducer::*;

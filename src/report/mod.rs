//! Reporting utilities: formatted terminal output for a skydip analysis.

pub mod format;

pub use format::*;

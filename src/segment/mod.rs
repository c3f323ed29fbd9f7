//! Run segmentation.
//!
//! Splits the time-ordered record stream into maximal contiguous runs of the
//! same position tag and reduces each run to a [`RunSummary`](crate::domain::RunSummary).

pub mod runs;

pub use runs::*;

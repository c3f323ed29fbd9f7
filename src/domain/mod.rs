//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records and position tags (`MeasurementRecord`, `Position`)
//! - intermediate products (`RunSummary`, `AirmassPoint`)
//! - fit outputs (`FitResult`, `SkydipAnalysis`)
//! - configuration enums and structs (`AnalysisOptions`, `SkydipConfig`)

pub mod types;

pub use types::*;

//! `skydip-tau` library crate.
//!
//! Derives the atmospheric optical thickness (tau) of a radio-telescope site
//! from a skydip: HOT calibration-load and SKY measurements at a ladder of
//! elevations.
//!
//! The binary (`skydip`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline can be driven from other tools with real instrument records

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod pairing;
pub mod plot;
pub mod report;
pub mod segment;

pub use analysis::analyze;

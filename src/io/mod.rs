//! Output helpers.
//!
//! - analysis exports (JSON/CSV) to any writer (`export`)

pub mod export;

pub use export::*;

//! Weighted straight-line fit of log term against airmass.
//!
//! Responsibilities:
//!
//! - drop missing points and apply the zero-error policy (`weights`)
//! - solve the weighted regression and report diagnostics (`fitter`)

pub mod fitter;
pub mod weights;

pub use fitter::*;
pub use weights::*;

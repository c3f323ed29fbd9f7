//! Weighted degree-1 regression of log term against airmass.
//!
//! Given the airmass points of one skydip we:
//! - keep the points with a present, finite log term and weight each by its
//!   propagated error (`weights::select_samples`)
//! - solve `log_term ≈ tau · secz + intercept` by weighted least squares
//!
//! and report the slope (tau), the intercept, their formal errors and a few
//! residual diagnostics.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::{AirmassPoint, AnalysisOptions, FitQuality, FitResult};
use crate::error::SkydipError;
use crate::fit::weights::select_samples;
use crate::math::{solve_weighted_least_squares, weighted_covariance};

/// Fit the airmass points.
///
/// Fails with [`SkydipError::InsufficientData`] when fewer than two points
/// survive masking and the zero-error policy, and with
/// [`SkydipError::Degenerate`] when the surviving points share one airmass.
pub fn fit_line(
    points: &[AirmassPoint],
    opts: &AnalysisOptions,
) -> Result<FitResult, SkydipError> {
    let selected = select_samples(points, opts.zero_error, opts.weighting)?;
    let n = selected.samples.len();
    if n < 2 {
        return Err(SkydipError::InsufficientData { valid: n });
    }

    let x_real: Vec<f64> = selected.samples.iter().map(|s| s.secz).collect();
    let y_real: Vec<f64> = selected.samples.iter().map(|s| s.log_term).collect();
    let w: Vec<f64> = selected.samples.iter().map(|s| s.weight).collect();

    // Columns: [secz, 1] so that beta = [tau, intercept].
    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &x) in x_real.iter().enumerate() {
        design[(i, 0)] = x;
        design[(i, 1)] = 1.0;
    }
    let y = DVector::from_row_slice(&y_real);

    let beta = solve_weighted_least_squares(&design, &y, &w).ok_or(SkydipError::Degenerate)?;
    let (tau, intercept) = (beta[0], beta[1]);

    let (tau_err, intercept_err) = match weighted_covariance(&design, &w) {
        Some(cov) => (cov[(0, 0)].sqrt(), cov[(1, 1)].sqrt()),
        None => (f64::NAN, f64::NAN),
    };

    let residuals: Vec<f64> = x_real
        .iter()
        .zip(&y_real)
        .map(|(&x, &y)| y - (tau * x + intercept))
        .collect();
    let chi2 = residuals.iter().zip(&w).map(|(r, wi)| wi * r * r).sum::<f64>();
    let rmse = (residuals.iter().map(|r| r * r).sum::<f64>() / n as f64).sqrt();

    debug!(
        "fit {n} point(s) ({} rejected): tau={tau:.6} intercept={intercept:.6} chi2={chi2:.4}",
        selected.rejected
    );

    Ok(FitResult {
        tau,
        intercept,
        tau_err,
        intercept_err,
        quality: FitQuality {
            n,
            rejected: selected.rejected,
            chi2,
            rmse,
        },
    })
}

//! Selection of fit samples and their regression weights.

use log::warn;

use crate::domain::{AirmassPoint, WeightScheme, ZeroErrorPolicy};
use crate::error::SkydipError;

/// A point that enters the regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSample {
    /// Index into the airmass point sequence.
    pub index: usize,
    pub secz: f64,
    pub log_term: f64,
    pub error: f64,
    /// Regression weight derived from `error`.
    pub weight: f64,
}

/// Samples kept for fitting plus the count of valid points the policy removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSamples {
    pub samples: Vec<FitSample>,
    pub rejected: usize,
}

/// Keep the points with a present log term, resolve unusable errors and
/// attach regression weights.
///
/// Missing points are skipped silently. A NaN or infinite error is always
/// rejected since it carries no usable weight. A zero error is handled per
/// `policy`; [`ZeroErrorPolicy::Cap`] replaces it with the smallest non-zero
/// error among the kept samples (or `1.0` when every error is zero), so the
/// point gets the largest weight present in the data. Points whose airmass,
/// log term or weight is not finite (a NaN elevation, or an error so small the
/// weight overflows) are rejected as well.
pub fn select_samples(
    points: &[AirmassPoint],
    policy: ZeroErrorPolicy,
    scheme: WeightScheme,
) -> Result<FitSamples, SkydipError> {
    let mut samples = Vec::with_capacity(points.len());
    let mut rejected = 0usize;

    for (index, point) in points.iter().enumerate() {
        let Some(term) = point.term else {
            continue;
        };
        let error = term.error.abs();

        if !(point.secz.is_finite() && term.value.is_finite()) {
            warn!(
                "airmass point #{index}: non-finite secz {} or log term {}, rejected",
                point.secz, term.value
            );
            rejected += 1;
            continue;
        }
        if !error.is_finite() {
            warn!("airmass point #{index}: non-finite error {}, rejected", term.error);
            rejected += 1;
            continue;
        }
        if error == 0.0 {
            match policy {
                ZeroErrorPolicy::Reject => {
                    warn!("airmass point #{index}: zero error, rejected");
                    rejected += 1;
                    continue;
                }
                ZeroErrorPolicy::Cap => {}
                ZeroErrorPolicy::Fail => return Err(SkydipError::ZeroError { index }),
            }
        }

        samples.push(FitSample {
            index,
            secz: point.secz,
            log_term: term.value,
            error,
            weight: f64::NAN,
        });
    }

    if policy == ZeroErrorPolicy::Cap {
        let floor = samples
            .iter()
            .map(|s| s.error)
            .filter(|&e| e > 0.0)
            .min_by(f64::total_cmp)
            .unwrap_or(1.0);
        for s in samples.iter_mut().filter(|s| s.error == 0.0) {
            warn!("airmass point #{}: zero error, capped at {floor:e}", s.index);
            s.error = floor;
        }
    }

    for s in samples.iter_mut() {
        s.weight = weight(s.error, scheme);
    }
    let before = samples.len();
    samples.retain(|s| {
        let keep = s.weight.is_finite();
        if !keep {
            warn!(
                "airmass point #{}: error {:e} gives a non-finite weight, rejected",
                s.index, s.error
            );
        }
        keep
    });
    rejected += before - samples.len();

    Ok(FitSamples { samples, rejected })
}

/// Regression weight for one sample error.
pub fn weight(error: f64, scheme: WeightScheme) -> f64 {
    let inv_var = 1.0 / (error * error);
    match scheme {
        WeightScheme::InverseVariance => inv_var,
        WeightScheme::PolyfitCompat => inv_var * inv_var,
    }
}

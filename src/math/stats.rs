//! Summary statistics over run samples.
//!
//! `mean` propagates NaN (a single NaN intensity poisons the run mean), while
//! `nan_std` and `nan_median` ignore NaN entries. Empty input yields NaN.

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation over the non-NaN entries.
pub fn nan_std(values: &[f64]) -> f64 {
    let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if kept.is_empty() {
        return f64::NAN;
    }
    let m = mean(&kept);
    let var = kept.iter().map(|v| (v - m).powi(2)).sum::<f64>() / kept.len() as f64;
    var.sqrt()
}

/// Median over the non-NaN entries.
pub fn nan_median(values: &[f64]) -> f64 {
    let mut kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if kept.is_empty() {
        return f64::NAN;
    }
    kept.sort_by(f64::total_cmp);
    let mid = kept.len() / 2;
    if kept.len() % 2 == 1 {
        kept[mid]
    } else {
        (kept[mid - 1] + kept[mid]) / 2.0
    }
}

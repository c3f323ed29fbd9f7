//! Skydip analysis: segment → reduce → fit.
//!
//! Every stage is a pure function producing a fresh container, so the whole
//! analysis is a deterministic function of the record slice.

use log::info;

use crate::domain::{AnalysisOptions, MeasurementRecord, SkydipAnalysis};
use crate::error::SkydipError;
use crate::fit::fit_line;
use crate::pairing::reduce;
use crate::segment::segment;

/// Run the full pipeline over `records`.
pub fn analyze(
    records: &[MeasurementRecord],
    opts: &AnalysisOptions,
) -> Result<SkydipAnalysis, SkydipError> {
    let runs = segment(records, opts.trailing_run);
    let points = reduce(&runs, opts.unpaired_sky)?;
    let fit = fit_line(&points, opts)?;

    info!(
        "skydip: {} records, {} runs, {} points, tau = {:.4} ± {:.4}",
        records.len(),
        runs.len(),
        points.len(),
        fit.tau,
        fit.tau_err
    );

    Ok(SkydipAnalysis { runs, points, fit })
}

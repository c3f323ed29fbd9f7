//! Shared pipeline logic used by every command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! sample generation -> segmentation -> pairing -> fit
//!
//! The commands can then focus on presentation.

use crate::analysis::analyze;
use crate::data::generate_skydip;
use crate::domain::{SkydipAnalysis, SkydipConfig};
use crate::error::AppError;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Number of synthetic records fed to the analysis.
    pub record_count: usize,
    pub analysis: SkydipAnalysis,
}

/// Generate the synthetic sequence and analyze it.
pub fn run_skydip(config: &SkydipConfig) -> Result<RunOutput, AppError> {
    let records = generate_skydip(&config.sample)?;
    let analysis = analyze(&records, &config.analysis)?;
    Ok(RunOutput {
        record_count: records.len(),
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisOptions, SampleConfig};

    fn config(sample: SampleConfig) -> SkydipConfig {
        SkydipConfig {
            sample,
            analysis: AnalysisOptions::default(),
            plot: false,
            plot_width: 72,
            plot_height: 20,
        }
    }

    #[test]
    fn recovers_the_injected_tau() {
        let out = run_skydip(&config(SampleConfig::default())).unwrap();
        let tau = -out.analysis.tau();
        assert_eq!(out.analysis.points.len(), SampleConfig::default().elevations.len());
        assert!((tau - 0.1).abs() < 0.02, "recovered tau = {tau}");
    }

    #[test]
    fn summary_reports_the_record_count() {
        let cfg = config(SampleConfig::default());
        let out = run_skydip(&cfg).unwrap();
        let blocks = 2 * cfg.sample.elevations.len() + 1;
        assert_eq!(out.record_count, blocks * cfg.sample.records_per_block);

        let txt = crate::report::format_run_summary(&out.analysis, out.record_count, &cfg);
        assert!(txt.contains(&format!("Records: n={} | runs: n=", out.record_count)));
    }

    #[test]
    fn noiseless_sequences_hit_the_zero_error_policy() {
        // Without noise every run has zero spread, so every point is rejected.
        let sample = SampleConfig {
            noise: 0.0,
            ..SampleConfig::default()
        };
        let err = run_skydip(&config(sample)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}

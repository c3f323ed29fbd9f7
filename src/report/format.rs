//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{AirmassPoint, RunSummary, SkydipAnalysis, SkydipConfig};

/// Format the full run summary (sequence stats + fit diagnostics + tau).
pub fn format_run_summary(
    analysis: &SkydipAnalysis,
    record_count: usize,
    config: &SkydipConfig,
) -> String {
    let mut out = String::new();
    let fit = &analysis.fit;
    let sample = &config.sample;
    let opts = &config.analysis;

    out.push_str("=== skydip - atmospheric optical thickness ===\n");
    out.push_str(&format!(
        "Sample: tau={:.3} T_hot={:.1}K T_atm={:.1}K gain={:.2} noise={:.2} seed={}\n",
        sample.tau, sample.t_hot, sample.t_atm, sample.gain, sample.noise, sample.seed
    ));
    out.push_str(&format!(
        "Policies: trailing={:?} unpaired-sky={:?} zero-error={:?} weighting={:?}\n",
        opts.trailing_run, opts.unpaired_sky, opts.zero_error, opts.weighting
    ));

    let missing = analysis.points.iter().filter(|p| p.is_missing()).count();
    out.push_str(&format!(
        "Records: n={} | runs: n={} | points: n={} (missing={}, rejected={})\n",
        record_count,
        analysis.runs.len(),
        analysis.points.len(),
        missing,
        fit.quality.rejected
    ));

    out.push_str("\nFit: log(hot-sky) = tau * secz + intercept\n");
    out.push_str(&format!("- tau      : {:+.6} ± {:.6}\n", fit.tau, fit.tau_err));
    out.push_str(&format!("- intercept: {:+.6} ± {:.6}\n", fit.intercept, fit.intercept_err));
    out.push_str(&format!(
        "- n={} chi2={:.4} rmse={:.6}\n",
        fit.quality.n, fit.quality.chi2, fit.quality.rmse
    ));
    out.push_str(&format!("\ntau = {}\n", fit.tau_label()));

    out
}

/// Format the run table.
pub fn format_runs(runs: &[RunSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:<8} {:>4} {:>12} {:>10} {:>8}\n",
        "#", "pos", "n", "mean", "std", "el"
    ));
    for (i, r) in runs.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:<8} {:>4} {:>12} {:>10} {:>8}\n",
            i,
            truncate(&r.position.to_string(), 8),
            r.samples,
            fmt_f(r.mean_intensity, 3),
            fmt_f(r.std_intensity, 3),
            fmt_f(r.mean_elevation, 2),
        ));
    }
    out
}

/// Format the airmass point table.
pub fn format_points(points: &[AirmassPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>8} {:>8} {:>10} {:>10}\n",
        "#", "el", "secz", "log_term", "error"
    ));
    for (i, p) in points.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>8} {:>8} {:>10} {:>10}\n",
            i,
            fmt_f(p.elevation, 2),
            fmt_f(p.secz, 4),
            fmt_f(p.log_term(), 5),
            fmt_f(p.error(), 5),
        ));
    }
    out
}

fn fmt_f(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{v:.decimals$}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogAmplitude, Position};

    #[test]
    fn runs_table_shows_placeholder_as_nan() {
        let runs = vec![
            RunSummary::placeholder(Position::Unset),
            RunSummary {
                position: Position::Hot,
                samples: 2,
                mean_intensity: 10.0,
                std_intensity: 0.0,
                mean_elevation: 45.0,
            },
        ];
        let txt = format_runs(&runs);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "   0 -           0          nan        nan      nan");
        assert_eq!(lines[2], "   1 HOT         2       10.000      0.000    45.00");
    }

    #[test]
    fn points_table_marks_missing_terms() {
        let points = vec![
            AirmassPoint {
                elevation: 60.0,
                secz: 1.1547,
                term: Some(LogAmplitude { value: 1.79176, error: 0.01 }),
            },
            AirmassPoint {
                elevation: 30.0,
                secz: 2.0,
                term: None,
            },
        ];
        let txt = format_points(&points);
        assert!(txt.contains("1.79176"));
        let last = txt.lines().last().unwrap();
        assert!(last.contains("2.0000"));
        assert_eq!(last.matches("nan").count(), 2);
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("SLEWING-TO-TARGET", 8), "SLEWING.");
        assert_eq!(truncate("HOT", 8), "HOT");
    }
}

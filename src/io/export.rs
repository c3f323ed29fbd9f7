//! Export analysis results.
//!
//! The exports are meant to be easy to consume in spreadsheets, notebooks or
//! plotting scripts. Missing log terms are written as empty CSV cells and as
//! `null` in JSON.

use std::io::Write;

use crate::domain::{AirmassPoint, SkydipAnalysis};
use crate::error::AppError;

/// Write the full analysis (runs, points, fit) as pretty JSON.
pub fn write_analysis_json<W: Write>(writer: W, analysis: &SkydipAnalysis) -> Result<(), AppError> {
    serde_json::to_writer_pretty(writer, analysis)
        .map_err(|e| AppError::new(2, format!("Failed to write analysis JSON: {e}")))
}

/// Write the airmass points as CSV (`index,elevation,secz,log_term,error`).
pub fn write_points_csv<W: Write>(mut writer: W, points: &[AirmassPoint]) -> Result<(), AppError> {
    writeln!(writer, "index,elevation,secz,log_term,error")
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    for (i, p) in points.iter().enumerate() {
        let (term, err) = match p.term {
            Some(t) => (format!("{:.10}", t.value), format!("{:.10}", t.error)),
            None => (String::new(), String::new()),
        };
        writeln!(writer, "{i},{:.6},{:.10},{term},{err}", p.elevation, p.secz)
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, FitResult, LogAmplitude, Position, RunSummary};

    fn analysis() -> SkydipAnalysis {
        SkydipAnalysis {
            runs: vec![RunSummary::placeholder(Position::Unset)],
            points: vec![
                AirmassPoint {
                    elevation: 60.0,
                    secz: 1.5,
                    term: Some(LogAmplitude { value: 1.25, error: 0.5 }),
                },
                AirmassPoint {
                    elevation: 30.0,
                    secz: 2.0,
                    term: None,
                },
            ],
            fit: FitResult {
                tau: -0.1,
                intercept: 2.0,
                tau_err: 0.01,
                intercept_err: 0.02,
                quality: FitQuality {
                    n: 1,
                    rejected: 0,
                    chi2: 0.0,
                    rmse: 0.0,
                },
            },
        }
    }

    #[test]
    fn csv_leaves_missing_terms_empty() {
        let mut buf = Vec::new();
        write_points_csv(&mut buf, &analysis().points).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "index,elevation,secz,log_term,error");
        assert_eq!(lines[1], "0,60.000000,1.5000000000,1.2500000000,0.5000000000");
        assert_eq!(lines[2], "1,30.000000,2.0000000000,,");
    }

    #[test]
    fn json_uses_null_for_missing_and_nan() {
        let mut buf = Vec::new();
        write_analysis_json(&mut buf, &analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["runs"][0]["position"], "");
        assert!(value["runs"][0]["mean_intensity"].is_null());
        assert!(value["points"][1]["term"].is_null());
        assert_eq!(value["points"][0]["term"]["value"], 1.25);
        assert_eq!(value["fit"]["tau"], -0.1);
    }
}

//! Fold over run summaries carrying the most recent HOT calibration.

use log::{debug, warn};

use crate::domain::{AirmassPoint, LogAmplitude, Position, RunSummary, UnpairedSky};
use crate::error::SkydipError;
use crate::math::secz;

/// Calibration state taken from the latest HOT run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotState {
    pub mean: f64,
    pub std: f64,
}

impl HotState {
    fn from_run(run: &RunSummary) -> Self {
        Self {
            mean: run.mean_intensity,
            std: run.std_intensity,
        }
    }
}

/// `ln(hot - sky)` with its propagated error, or `None` when `hot - sky` is not positive.
///
/// The error is `sqrt(σ_hot² + σ_sky²) / (hot - sky)`, first-order propagation
/// through the logarithm.
pub fn log_amplitude(hot: HotState, sky: &RunSummary) -> Option<LogAmplitude> {
    let diff = hot.mean - sky.mean_intensity;
    if diff.is_nan() || diff <= 0.0 {
        return None;
    }
    Some(LogAmplitude {
        value: diff.ln(),
        error: hot.std.hypot(sky.std_intensity) / diff,
    })
}

/// Pair every SKY run with the preceding HOT run.
///
/// Emits one point per SKY run (per *paired* SKY run under
/// [`UnpairedSky::Skip`]). Runs with any other tag are ignored.
pub fn reduce(
    runs: &[RunSummary],
    unpaired: UnpairedSky,
) -> Result<Vec<AirmassPoint>, SkydipError> {
    let mut hot: Option<HotState> = None;
    let mut points = Vec::new();

    for (run_index, run) in runs.iter().enumerate() {
        match run.position {
            Position::Hot => hot = Some(HotState::from_run(run)),
            Position::Sky => {
                let Some(hot) = hot else {
                    match unpaired {
                        UnpairedSky::Error => return Err(SkydipError::NoPriorHot { run_index }),
                        UnpairedSky::Skip => {
                            warn!("skipping SKY run #{run_index}: no prior HOT run");
                            continue;
                        }
                    }
                };
                let term = log_amplitude(hot, run);
                if term.is_none() {
                    debug!(
                        "SKY run #{run_index}: hot - sky = {:.6} is not positive, term missing",
                        hot.mean - run.mean_intensity
                    );
                }
                points.push(AirmassPoint {
                    elevation: run.mean_elevation,
                    secz: secz(run.mean_elevation),
                    term,
                });
            }
            Position::Unset | Position::Other(_) => {}
        }
    }

    debug!(
        "paired {} SKY run(s), {} with a valid log term",
        points.len(),
        points.iter().filter(|p| !p.is_missing()).count()
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(position: Position, mean: f64, std: f64, elevation: f64) -> RunSummary {
        RunSummary {
            position,
            samples: 2,
            mean_intensity: mean,
            std_intensity: std,
            mean_elevation: elevation,
        }
    }

    #[test]
    fn single_pair_scenario() {
        let runs = vec![
            RunSummary::placeholder(Position::Unset),
            run(Position::Hot, 10.0, 0.0, 45.0),
            run(Position::Sky, 4.0, 0.0, 60.0),
        ];
        let points = reduce(&runs, UnpairedSky::Error).unwrap();
        assert_eq!(points.len(), 1);

        let p = points[0];
        assert!((p.log_term() - 6.0_f64.ln()).abs() < 1e-12);
        assert!((p.log_term() - 1.7918).abs() < 1e-4);
        assert_eq!(p.error(), 0.0);
        assert!((p.secz - 1.1547).abs() < 1e-4);
    }

    #[test]
    fn error_is_propagated_through_the_log() {
        let runs = vec![run(Position::Hot, 20.0, 3.0, 45.0), run(Position::Sky, 10.0, 4.0, 45.0)];
        let points = reduce(&runs, UnpairedSky::Error).unwrap();
        // sqrt(9 + 16) / 10
        assert!((points[0].error() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_positive_difference_keeps_airmass() {
        let runs = vec![
            run(Position::Hot, 4.0, 0.1, 45.0),
            run(Position::Sky, 4.0, 0.1, 30.0),
            run(Position::Sky, 5.0, 0.1, 60.0),
        ];
        let points = reduce(&runs, UnpairedSky::Error).unwrap();
        assert_eq!(points.len(), 2);
        for p in &points {
            assert!(p.is_missing());
            assert!(p.log_term().is_nan() && p.error().is_nan());
            assert!(p.secz.is_finite());
        }
        assert!((points[0].secz - 2.0).abs() < 1e-12);
        assert!((points[1].secz - 1.0 / 30.0_f64.to_radians().cos()).abs() < 1e-12);
    }

    #[test]
    fn latest_hot_calibrates_following_skies() {
        let runs = vec![
            run(Position::Hot, 10.0, 0.0, 45.0),
            run(Position::Sky, 5.0, 0.0, 80.0),
            run(Position::Other("COLD".to_string()), 1.0, 0.0, 45.0),
            run(Position::Sky, 6.0, 0.0, 70.0),
            run(Position::Hot, 20.0, 0.0, 45.0),
            run(Position::Sky, 5.0, 0.0, 60.0),
        ];
        let points = reduce(&runs, UnpairedSky::Error).unwrap();
        let terms: Vec<f64> = points.iter().map(AirmassPoint::log_term).collect();
        assert_eq!(points.len(), 3);
        assert!((terms[0] - 5.0_f64.ln()).abs() < 1e-12);
        assert!((terms[1] - 4.0_f64.ln()).abs() < 1e-12);
        assert!((terms[2] - 15.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn output_length_matches_sky_run_count() {
        let runs = vec![
            RunSummary::placeholder(Position::Unset),
            run(Position::Hot, 10.0, 0.1, 45.0),
            run(Position::Sky, 3.0, 0.1, 80.0),
            run(Position::Hot, 10.0, 0.1, 45.0),
            run(Position::Sky, 12.0, 0.1, 50.0),
            run(Position::Sky, 4.0, 0.1, 40.0),
        ];
        let n_sky = runs.iter().filter(|r| r.position == Position::Sky).count();
        assert_eq!(reduce(&runs, UnpairedSky::Error).unwrap().len(), n_sky);
    }

    #[test]
    fn sky_before_hot_is_an_error_or_skipped() {
        let runs = vec![
            RunSummary::placeholder(Position::Unset),
            run(Position::Sky, 3.0, 0.1, 80.0),
            run(Position::Hot, 10.0, 0.1, 45.0),
            run(Position::Sky, 4.0, 0.1, 60.0),
        ];
        assert_eq!(
            reduce(&runs, UnpairedSky::Error),
            Err(SkydipError::NoPriorHot { run_index: 1 })
        );

        let points = reduce(&runs, UnpairedSky::Skip).unwrap();
        assert_eq!(points.len(), 1);
        assert!((points[0].log_term() - 6.0_f64.ln()).abs() < 1e-12);
    }
}

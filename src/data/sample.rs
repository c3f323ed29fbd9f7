//! Synthetic skydip record generation.
//!
//! The sequence visits each elevation with a HOT block followed by a SKY block
//! and closes with one more HOT block, as a real skydip does. Each record
//! carries a per-channel spectrum that is reduced to a scalar with a median.
//!
//! Signal model (gain `g`, load `T_hot`, atmosphere `T_atm`, opacity `tau`):
//!
//! ```text
//! hot = g · T_hot
//! sky = g · (T_hot - T_atm · exp(-tau · secz))
//! ln(hot - sky) = ln(g · T_atm) - tau · secz
//! ```
//!
//! so the fitted slope recovers `-tau`.

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use rayon::prelude::*;

use crate::domain::{MeasurementRecord, Position, SampleConfig};
use crate::error::AppError;
use crate::math::secz;

/// Default elevation ladder (degrees), high to low.
pub const DEFAULT_ELEVATIONS: [f64; 8] = [80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 25.0, 20.0];

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            tau: 0.1,
            t_hot: 300.0,
            t_atm: 270.0,
            gain: 10.0,
            elevations: DEFAULT_ELEVATIONS.to_vec(),
            records_per_block: 5,
            channels: 64,
            noise: 5.0,
            seed: 42,
        }
    }
}

/// Expected scalar powers `(hot, sky)` at an elevation.
pub fn expected_powers(config: &SampleConfig, elevation: f64) -> (f64, f64) {
    let hot = config.gain * config.t_hot;
    let sky = config.gain * (config.t_hot - config.t_atm * (-config.tau * secz(elevation)).exp());
    (hot, sky)
}

/// Generate the record sequence of one synthetic skydip.
pub fn generate_skydip(config: &SampleConfig) -> Result<Vec<MeasurementRecord>, AppError> {
    validate(config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    // Draw every spectrum sequentially so the output only depends on the seed.
    let mut spectra: Vec<(Position, f64, Vec<f64>)> = Vec::new();
    let mut block = |position: Position, elevation: f64, level: f64, rng: &mut StdRng| {
        for _ in 0..config.records_per_block {
            let channels = (0..config.channels)
                .map(|_| level + normal.sample(&mut *rng))
                .collect();
            spectra.push((position.clone(), elevation, channels));
        }
    };

    for &el in &config.elevations {
        let (hot, sky) = expected_powers(config, el);
        block(Position::Hot, el, hot, &mut rng);
        block(Position::Sky, el, sky, &mut rng);
    }
    // Closing calibration. Not paired with any SKY run.
    let last_el = config.elevations.last().copied().unwrap_or(90.0);
    block(Position::Hot, last_el, config.gain * config.t_hot, &mut rng);

    // Channel medians are independent per record; `collect` keeps input order.
    let records: Vec<MeasurementRecord> = spectra
        .par_iter()
        .map(|(position, elevation, channels)| {
            MeasurementRecord::from_channels(position.clone(), *elevation, channels)
        })
        .collect();

    debug!(
        "generated {} record(s) over {} elevation(s), {} channel(s) each",
        records.len(),
        config.elevations.len(),
        config.channels
    );
    Ok(records)
}

fn validate(config: &SampleConfig) -> Result<(), AppError> {
    if config.elevations.is_empty() {
        return Err(AppError::new(2, "At least one elevation is required."));
    }
    if let Some(el) = config
        .elevations
        .iter()
        .find(|el| !(el.is_finite() && **el > 0.0 && **el <= 90.0))
    {
        return Err(AppError::new(
            2,
            format!("Invalid elevation {el}: must be in (0, 90] degrees."),
        ));
    }
    if config.records_per_block == 0 || config.channels == 0 {
        return Err(AppError::new(2, "Records per block and channel count must be > 0."));
    }
    if !(config.tau.is_finite() && config.tau >= 0.0) {
        return Err(AppError::new(
            2,
            format!("Invalid tau {}: must be finite and >= 0.", config.tau),
        ));
    }
    if !(config.gain.is_finite() && config.gain > 0.0) {
        return Err(AppError::new(2, "Gain must be finite and > 0."));
    }
    if !(config.t_hot.is_finite() && config.t_atm.is_finite() && config.t_atm > 0.0) {
        return Err(AppError::new(2, "Temperatures must be finite and T_atm > 0."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_layout() {
        let config = SampleConfig {
            elevations: vec![70.0, 40.0],
            records_per_block: 3,
            channels: 8,
            ..SampleConfig::default()
        };
        let records = generate_skydip(&config).unwrap();
        assert_eq!(records.len(), (2 * 2 + 1) * 3);

        let tags: Vec<&Position> = records.iter().step_by(3).map(|r| &r.position).collect();
        assert_eq!(
            tags,
            vec![&Position::Hot, &Position::Sky, &Position::Hot, &Position::Sky, &Position::Hot]
        );
        assert_eq!(records[3].elevation, 70.0);
        assert_eq!(records[9].elevation, 40.0);
    }

    #[test]
    fn same_seed_same_records() {
        let config = SampleConfig::default();
        assert_eq!(generate_skydip(&config).unwrap(), generate_skydip(&config).unwrap());

        let other = SampleConfig {
            seed: 7,
            ..SampleConfig::default()
        };
        assert_ne!(generate_skydip(&config).unwrap(), generate_skydip(&other).unwrap());
    }

    #[test]
    fn noiseless_records_follow_the_model() {
        let config = SampleConfig {
            noise: 0.0,
            ..SampleConfig::default()
        };
        let records = generate_skydip(&config).unwrap();
        let (hot, sky) = expected_powers(&config, 60.0);
        let at_60: Vec<_> = records.iter().filter(|r| r.elevation == 60.0).collect();
        assert!(at_60.iter().any(|r| r.position == Position::Hot && r.intensity == hot));
        assert!(at_60.iter().any(|r| r.position == Position::Sky && r.intensity == sky));

        // ln(hot - sky) = ln(g · T_atm) - tau · secz
        let expected = (config.gain * config.t_atm).ln() - config.tau * secz(60.0);
        assert!(((hot - sky).ln() - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_configs() {
        let bad = [
            SampleConfig {
                elevations: vec![],
                ..SampleConfig::default()
            },
            SampleConfig {
                elevations: vec![60.0, 95.0],
                ..SampleConfig::default()
            },
            SampleConfig {
                channels: 0,
                ..SampleConfig::default()
            },
            SampleConfig {
                noise: -1.0,
                ..SampleConfig::default()
            },
        ];
        for config in bad {
            let err = generate_skydip(&config).unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }
    }
}

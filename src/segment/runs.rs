//! Fold over the record stream producing closed runs.
//!
//! The fold carries the currently open run (tag + accumulated samples). A run
//! is emitted only when a record with a different tag closes it. The run that
//! is open before the first record has the `Unset` tag, so the first close
//! always emits it, as an all-NaN placeholder when it accumulated nothing.
//!
//! Whether the final open run is emitted is governed by [`TrailingRun`].

use log::debug;

use crate::domain::{MeasurementRecord, Position, RunSummary, TrailingRun};
use crate::math::{mean, nan_std};

/// The run currently accumulating samples.
#[derive(Debug, Clone, Default)]
struct OpenRun {
    position: Position,
    intensities: Vec<f64>,
    elevations: Vec<f64>,
}

impl OpenRun {
    fn start(record: &MeasurementRecord) -> Self {
        Self {
            position: record.position.clone(),
            intensities: vec![record.intensity],
            elevations: vec![record.elevation],
        }
    }

    fn push(&mut self, record: &MeasurementRecord) {
        self.intensities.push(record.intensity);
        self.elevations.push(record.elevation);
    }

    fn close(self) -> RunSummary {
        if self.intensities.is_empty() {
            return RunSummary::placeholder(self.position);
        }
        RunSummary {
            samples: self.intensities.len(),
            mean_intensity: mean(&self.intensities),
            std_intensity: nan_std(&self.intensities),
            mean_elevation: mean(&self.elevations),
            position: self.position,
        }
    }
}

/// Segment `records` into run summaries, in input order.
///
/// With [`TrailingRun::Drop`] the output length equals the number of tag
/// transitions in `records` (counting the transition away from the initial
/// `Unset` tag).
pub fn segment(records: &[MeasurementRecord], trailing: TrailingRun) -> Vec<RunSummary> {
    let (mut runs, open) = records.iter().fold(
        (Vec::new(), OpenRun::default()),
        |(mut runs, mut open), record| {
            if record.position == open.position {
                open.push(record);
            } else {
                runs.push(std::mem::replace(&mut open, OpenRun::start(record)).close());
            }
            (runs, open)
        },
    );

    // An untouched initial run means there were no records at all.
    if trailing == TrailingRun::Flush && !open.intensities.is_empty() {
        runs.push(open.close());
    }

    debug!(
        "segmented {} record(s) into {} run(s) (trailing: {:?})",
        records.len(),
        runs.len(),
        trailing
    );
    runs
}

//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory by the segment → reduce → fit pipeline
//! - exported to JSON/CSV
//! - rendered by the terminal report and plot

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Label of the calibration-load position.
pub const HOT_LABEL: &str = "HOT";
/// Label of the sky position.
pub const SKY_LABEL: &str = "SKY";

/// Position tag of a measurement record.
///
/// Instruments store the tag as a fixed-width, right-padded label
/// (`"HOT  "`, `"SKY  "`, `"     "`). Parsing trims the padding, so two tags
/// compare equal exactly when their padded labels would.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    /// Blank label. Also the tag of the run that is open before the first record.
    #[default]
    Unset,
    Hot,
    Sky,
    /// Any other label (e.g. a cold load or a slew marker).
    Other(String),
}

impl Position {
    /// Parse a (possibly right-padded) label.
    pub fn parse(label: &str) -> Self {
        let label = label.trim_end_matches([' ', '\0']);
        match label {
            "" => Position::Unset,
            HOT_LABEL => Position::Hot,
            SKY_LABEL => Position::Sky,
            other => Position::Other(other.to_string()),
        }
    }

    /// Canonical label without padding (empty for `Unset`).
    pub fn label(&self) -> &str {
        match self {
            Position::Unset => "",
            Position::Hot => HOT_LABEL,
            Position::Sky => SKY_LABEL,
            Position::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Unset => write!(f, "-"),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Position::parse(&value)
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.label().to_string()
    }
}

/// One observation of the skydip sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub position: Position,
    /// Elevation in degrees.
    pub elevation: f64,
    /// Scalar power, already reduced over spectral channels.
    pub intensity: f64,
}

impl MeasurementRecord {
    pub fn new(position: Position, elevation: f64, intensity: f64) -> Self {
        Self {
            position,
            elevation,
            intensity,
        }
    }

    /// Build a record from a per-channel spectrum, reducing it with a NaN-ignoring median.
    pub fn from_channels(position: Position, elevation: f64, channels: &[f64]) -> Self {
        Self::new(position, elevation, crate::math::nan_median(channels))
    }
}

/// A maximal contiguous run of records sharing one position tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub position: Position,
    /// Number of records in the run. Zero only for the leading placeholder.
    pub samples: usize,
    pub mean_intensity: f64,
    /// Population standard deviation, ignoring NaN intensities.
    pub std_intensity: f64,
    pub mean_elevation: f64,
}

impl RunSummary {
    /// All-NaN summary emitted when the initial open run closes empty.
    pub fn placeholder(position: Position) -> Self {
        Self {
            position,
            samples: 0,
            mean_intensity: f64::NAN,
            std_intensity: f64::NAN,
            mean_elevation: f64::NAN,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.samples == 0
    }
}

/// `ln(hot - sky)` and its propagated 1σ error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogAmplitude {
    pub value: f64,
    pub error: f64,
}

/// One HOT → SKY pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirmassPoint {
    /// Mean elevation of the SKY run (degrees).
    pub elevation: f64,
    /// Airmass `1 / cos(zenith)`.
    pub secz: f64,
    /// `None` when `hot - sky <= 0`; the airmass is kept to stay index-aligned.
    pub term: Option<LogAmplitude>,
}

impl AirmassPoint {
    pub fn is_missing(&self) -> bool {
        self.term.is_none()
    }

    /// Log term, NaN when missing.
    pub fn log_term(&self) -> f64 {
        self.term.map_or(f64::NAN, |t| t.value)
    }

    /// Propagated error, NaN when missing.
    pub fn error(&self) -> f64 {
        self.term.map_or(f64::NAN, |t| t.error)
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Points that entered the regression.
    pub n: usize,
    /// Valid points dropped by the zero-error policy.
    pub rejected: usize,
    /// Weighted sum of squared residuals.
    pub chi2: f64,
    /// Unweighted RMS residual in log-term units.
    pub rmse: f64,
}

/// Slope/intercept of `log_term ≈ tau · secz + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub tau: f64,
    pub intercept: f64,
    /// Formal 1σ error of `tau` from the weighted normal matrix.
    pub tau_err: f64,
    /// Formal 1σ error of `intercept`.
    pub intercept_err: f64,
    pub quality: FitQuality,
}

impl FitResult {
    /// Evaluate the fitted line.
    pub fn predict(&self, secz: f64) -> f64 {
        self.tau * secz + self.intercept
    }

    /// `|tau|` rounded to three decimals, as used for plot annotations.
    pub fn tau_label(&self) -> String {
        format!("{:.3}", self.tau.abs())
    }
}

/// Everything computed from one record sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkydipAnalysis {
    pub runs: Vec<RunSummary>,
    pub points: Vec<AirmassPoint>,
    pub fit: FitResult,
}

impl SkydipAnalysis {
    /// Airmass of every point, parallel to [`Self::log_term`] and [`Self::err`].
    pub fn secz(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.secz).collect()
    }

    pub fn log_term(&self) -> Vec<f64> {
        self.points.iter().map(AirmassPoint::log_term).collect()
    }

    pub fn err(&self) -> Vec<f64> {
        self.points.iter().map(AirmassPoint::error).collect()
    }

    pub fn tau(&self) -> f64 {
        self.fit.tau
    }
}

/// What to do with the run that is still open when the records end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingRun {
    /// Never emit it. Skydips conventionally end on a HOT calibration that is
    /// not paired with anything.
    #[default]
    Drop,
    /// Emit it like every other run.
    Flush,
}

/// What to do with a SKY run seen before any HOT run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnpairedSky {
    /// Abort the analysis with a "no prior HOT run" error.
    #[default]
    Error,
    /// Skip the SKY run; it produces no airmass point.
    Skip,
}

/// What to do with a valid point whose propagated error is zero (infinite weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroErrorPolicy {
    /// Exclude the point from the regression.
    #[default]
    Reject,
    /// Replace the error with the smallest non-zero error in the data, giving
    /// the point the largest finite weight present.
    Cap,
    /// Abort the fit.
    Fail,
}

/// How propagated errors turn into regression weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WeightScheme {
    /// Minimize `Σ (r_i / σ_i)²`.
    #[default]
    InverseVariance,
    /// numpy `polyfit(w = 1/σ²)`: the weight multiplies the unsquared residual,
    /// so the objective is `Σ (r_i / σ_i²)²`.
    PolyfitCompat,
}

/// Knobs of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub trailing_run: TrailingRun,
    pub unpaired_sky: UnpairedSky,
    pub zero_error: ZeroErrorPolicy,
    pub weighting: WeightScheme,
}

/// Parameters of the synthetic skydip generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// True zenith optical thickness.
    pub tau: f64,
    /// Calibration load temperature (K).
    pub t_hot: f64,
    /// Atmospheric physical temperature (K).
    pub t_atm: f64,
    /// Receiver gain (counts per K).
    pub gain: f64,
    /// Elevations visited, in observing order (degrees).
    pub elevations: Vec<f64>,
    pub records_per_block: usize,
    pub channels: usize,
    /// Per-channel Gaussian noise (counts).
    pub noise: f64,
    pub seed: u64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct SkydipConfig {
    pub sample: SampleConfig,
    pub analysis: AnalysisOptions,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

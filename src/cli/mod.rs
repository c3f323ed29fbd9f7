//! Command-line parsing for the skydip analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use clap::{Parser, Subcommand};

use crate::data::DEFAULT_ELEVATIONS;
use crate::domain::{TrailingRun, UnpairedSky, WeightScheme, ZeroErrorPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "skydip", version, about = "Atmospheric optical thickness from skydip sequences")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a skydip, fit tau, print diagnostics and optionally plot.
    Analyze(SkydipArgs),
    /// Print the run segmentation table only.
    Runs(SkydipArgs),
    /// Print the airmass point table only.
    Points(SkydipArgs),
    /// Print the full analysis as JSON (useful for scripting).
    Json(SkydipArgs),
    /// Print the airmass points as CSV.
    Csv(SkydipArgs),
}

/// Options shared by every command.
#[derive(Debug, Parser, Clone)]
pub struct SkydipArgs {
    /// True zenith optical thickness of the synthetic atmosphere.
    #[arg(long, default_value_t = 0.1)]
    pub tau: f64,

    /// Calibration load temperature (K).
    #[arg(long, default_value_t = 300.0)]
    pub t_hot: f64,

    /// Atmospheric physical temperature (K).
    #[arg(long, default_value_t = 270.0)]
    pub t_atm: f64,

    /// Receiver gain (counts per K).
    #[arg(long, default_value_t = 10.0)]
    pub gain: f64,

    /// Elevations to visit, in order (degrees, comma separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_ELEVATIONS.to_vec())]
    pub elevations: Vec<f64>,

    /// Records per HOT or SKY block.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub records: usize,

    /// Spectral channels per record (reduced with a median).
    #[arg(long, default_value_t = 64)]
    pub channels: usize,

    /// Per-channel Gaussian noise (counts).
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,

    /// Random seed for the synthetic sequence.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// What to do with the run still open at the end of the sequence.
    #[arg(long, value_enum, default_value_t = TrailingRun::Drop)]
    pub trailing: TrailingRun,

    /// What to do with a SKY run seen before any HOT run.
    #[arg(long, value_enum, default_value_t = UnpairedSky::Error)]
    pub unpaired_sky: UnpairedSky,

    /// What to do with points whose propagated error is zero.
    #[arg(long, value_enum, default_value_t = ZeroErrorPolicy::Reject)]
    pub zero_error: ZeroErrorPolicy,

    /// How errors turn into regression weights.
    #[arg(long, value_enum, default_value_t = WeightScheme::InverseVariance)]
    pub weighting: WeightScheme,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

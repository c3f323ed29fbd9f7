//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - generates a synthetic skydip
//! - runs segmentation, pairing and the weighted fit
//! - prints reports/plots or machine-readable exports

use clap::Parser;

use crate::cli::{Command, SkydipArgs};
use crate::domain::{AnalysisOptions, SampleConfig, SkydipConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `skydip` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(&args),
        Command::Runs(args) => handle_table(&args, Table::Runs),
        Command::Points(args) => handle_table(&args, Table::Points),
        Command::Json(args) => handle_export(&args, Export::Json),
        Command::Csv(args) => handle_export(&args, Export::Csv),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Runs,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Export {
    Json,
    Csv,
}

fn handle_analyze(args: &SkydipArgs) -> Result<(), AppError> {
    let config = skydip_config_from_args(args);
    let run = pipeline::run_skydip(&config)?;

    println!("{}", crate::report::format_run_summary(&run.analysis, run.record_count, &config));
    println!("{}", crate::report::format_points(&run.analysis.points));

    if config.plot {
        let plot = crate::plot::render_analysis_plot(
            &run.analysis,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }
    Ok(())
}

fn handle_table(args: &SkydipArgs, table: Table) -> Result<(), AppError> {
    let config = skydip_config_from_args(args);
    let run = pipeline::run_skydip(&config)?;

    match table {
        Table::Runs => print!("{}", crate::report::format_runs(&run.analysis.runs)),
        Table::Points => print!("{}", crate::report::format_points(&run.analysis.points)),
    }
    Ok(())
}

fn handle_export(args: &SkydipArgs, export: Export) -> Result<(), AppError> {
    let config = skydip_config_from_args(args);
    let run = pipeline::run_skydip(&config)?;

    let stdout = std::io::stdout().lock();
    match export {
        Export::Json => {
            crate::io::write_analysis_json(stdout, &run.analysis)?;
            println!();
        }
        Export::Csv => crate::io::write_points_csv(stdout, &run.analysis.points)?,
    }
    Ok(())
}

pub fn skydip_config_from_args(args: &SkydipArgs) -> SkydipConfig {
    SkydipConfig {
        sample: SampleConfig {
            tau: args.tau,
            t_hot: args.t_hot,
            t_atm: args.t_atm,
            gain: args.gain,
            elevations: args.elevations.clone(),
            records_per_block: args.records,
            channels: args.channels,
            noise: args.noise,
            seed: args.seed,
        },
        analysis: AnalysisOptions {
            trailing_run: args.trailing,
            unpaired_sky: args.unpaired_sky,
            zero_error: args.zero_error,
            weighting: args.weighting,
        },
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

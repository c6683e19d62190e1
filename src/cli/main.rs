use std::path::PathBuf;

use clap::{Parser, Subcommand};

use race_medallion::cli::commands;
use race_medallion::cli::logging;

#[derive(Parser)]
#[command(
    name = "race-medallion",
    version,
    about = "Bronze/Silver/Gold pipeline for half-marathon race results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline
    Run {
        /// Path to a TOML pipeline config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Base data directory (overrides the config file)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Stages to run, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        stages: Vec<String>,
        /// Race distance in kilometres
        #[arg(long)]
        distance: Option<f64>,
        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Print stage progress to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check that every KPI table exists
    Validate {
        /// Path to a TOML pipeline config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Base data directory (overrides the config file)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List pipeline stages
    Stages,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run {
            config,
            data_dir,
            stages,
            distance,
            report,
            verbose,
        } => commands::run::handle_run(&commands::run::RunArgs {
            config_file: config,
            data_dir,
            stages,
            distance_km: distance,
            report,
            verbose,
        })?,
        Commands::Validate { config, data_dir } => {
            commands::validate::handle_validate(&commands::validate::ValidateArgs {
                config_file: config,
                data_dir,
            })?
        }
        Commands::Stages => commands::stages::handle_stages()?,
    }

    Ok(())
}

//! Run command implementation

use std::path::PathBuf;

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::cli::output::format_report;
use crate::pipeline::{PipelineExecutor, PipelineStage, PipelineStatus};

/// Arguments for the `run` command
pub struct RunArgs {
    /// Configuration file
    pub config_file: Option<PathBuf>,
    /// Data directory override
    pub data_dir: Option<PathBuf>,
    /// Stages to run (empty = configured stages)
    pub stages: Vec<String>,
    /// Race distance override in kilometres
    pub distance_km: Option<f64>,
    /// Where to write the JSON run report
    pub report: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
}

/// Handle the `run` command
pub fn handle_run(args: &RunArgs) -> Result<(), CliError> {
    let stages: Vec<PipelineStage> = args
        .stages
        .iter()
        .map(|s| s.parse::<PipelineStage>().map_err(CliError::InvalidArgument))
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = load_config(args.config_file.as_deref(), args.data_dir.as_deref())?;
    if !stages.is_empty() {
        config = config.with_stages(stages);
    }
    if let Some(distance) = args.distance_km {
        config = config.with_distance_km(distance);
    }
    if args.verbose {
        config = config.with_verbose(true);
    }

    let executor = PipelineExecutor::new(config)?;
    eprintln!("Starting pipeline run: {}", executor.run_id());

    let report = executor.run()?;
    print!("{}", format_report(&report));

    if let Some(path) = &args.report {
        report
            .save(path)
            .map_err(|e| CliError::ReportWriteError(path.clone(), e.to_string()))?;
        eprintln!("Run report written to {}", path.display());
    }

    match report.status {
        PipelineStatus::Partial => Err(CliError::ValidationError(
            report
                .validation
                .as_ref()
                .map(|v| v.summary())
                .unwrap_or_else(|| "Pipeline completed with errors".to_string()),
        )),
        PipelineStatus::Completed => Ok(()),
    }
}

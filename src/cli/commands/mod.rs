//! CLI command implementations

pub mod run;
pub mod stages;
pub mod validate;

use std::path::Path;

use crate::cli::error::CliError;
use crate::pipeline::{PipelineConfig, PipelineError};

/// Load the pipeline config from `config_file` (defaults when absent) and
/// apply the data directory override
pub(crate) fn load_config(
    config_file: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<PipelineConfig, CliError> {
    let mut config = match config_file {
        Some(path) => PipelineConfig::from_toml_file(path).map_err(|e| match e {
            PipelineError::FileNotFound(_) | PipelineError::IoError(_) => {
                CliError::ConfigReadError(path.to_path_buf(), e.to_string())
            }
            other => CliError::PipelineError(other),
        })?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    Ok(config)
}

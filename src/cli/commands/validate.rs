//! Validate command implementation

use std::path::PathBuf;

use crate::cli::commands::load_config;
use crate::cli::error::CliError;
use crate::cli::output::format_validation;
use crate::gold::GoldOutputs;
use crate::storage::FileSystemStorageBackend;
use crate::validation::validate_outputs;

/// Arguments for the `validate` command
pub struct ValidateArgs {
    /// Configuration file
    pub config_file: Option<PathBuf>,
    /// Data directory override
    pub data_dir: Option<PathBuf>,
}

/// Handle the `validate` command
///
/// Checks the Gold outputs at their well-known locations. Missing outputs
/// produce a `ValidationError` so the process exits non-zero.
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let config = load_config(args.config_file.as_deref(), args.data_dir.as_deref())?;
    config.validate().map_err(CliError::InvalidArgument)?;

    let storage = FileSystemStorageBackend::new(&config.data_dir);
    let report = validate_outputs(&GoldOutputs::well_known(&config), &storage);

    print!("{}", format_validation(&report));

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::ValidationError(report.summary()))
    }
}

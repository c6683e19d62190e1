//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::PipelineError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config file {0}: {1}")]
    ConfigReadError(PathBuf, String),

    #[error("{}", .0.user_message())]
    PipelineError(#[from] PipelineError),

    #[error("{0}")]
    ValidationError(String),

    #[error("Failed to write report {0}: {1}")]
    ReportWriteError(PathBuf, String),
}

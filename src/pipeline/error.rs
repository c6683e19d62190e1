//! Error types for pipeline operations
//!
//! Errors chain properly for debugging while still providing user-friendly
//! messages for CLI output.

use std::path::PathBuf;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while running a pipeline stage
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Pipeline configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input artifact is absent at the expected location
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A field value does not match its expected fixed format
    #[error("Malformed field '{column}' at row {row}: {value:?} ({reason})")]
    MalformedField {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    /// Input table has no rows where at least one is required
    #[error("Input table is empty: {0}")]
    EmptyInput(String),

    /// Record source failed to produce raw rows
    #[error("Source '{source_name}' failed: {message}")]
    SourceError {
        source_name: String,
        message: String,
    },

    /// Storage backend error
    #[error("Storage error: {0}")]
    StorageError(StorageError),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML configuration error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create a malformed-field error
    pub fn malformed(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedField {
            column: column.into(),
            row,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::ConfigError(msg) => {
                format!(
                    "Configuration error: {msg}\n\nHint: Check your pipeline configuration file."
                )
            }
            PipelineError::FileNotFound(path) => {
                format!(
                    "File not found: {}\n\nHint: Run the previous stage first or check the data directory.",
                    path.display()
                )
            }
            PipelineError::MalformedField { .. } => {
                format!("{self}\n\nHint: Fix the raw results table and re-run from bronze.")
            }
            _ => self.to_string(),
        }
    }
}

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileNotFound(path) => PipelineError::FileNotFound(PathBuf::from(path)),
            other => PipelineError::StorageError(other),
        }
    }
}

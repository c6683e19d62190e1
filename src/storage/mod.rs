//! Storage backend abstraction
//!
//! Stages read and write their artifacts through the [`StorageBackend`] trait
//! using storage-relative locations such as `silver/resultados_clean.csv`.
//! - FileSystemStorageBackend: native file system rooted at a base directory
//!
//! Tabular helpers for CSV artifacts live in [`table`].

pub mod filesystem;
pub mod table;

pub use filesystem::FileSystemStorageBackend;
pub use table::{TableRow, read_table, write_table};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Abstracts the file and directory operations the pipeline stages need.
/// All operations are synchronous; a stage runs to completion before the next
/// one starts.
pub trait StorageBackend: Send + Sync {
    /// Read a file from storage
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file to storage, replacing any previous content
    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Check if a file exists
    fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Create a directory (and any missing parents)
    fn create_dir(&self, path: &str) -> Result<(), StorageError>;
}

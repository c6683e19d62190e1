//! File system storage backend
//!
//! Implements StorageBackend on the native file system, rooted at the
//! pipeline's data directory.
//!
//! ## Security
//!
//! Paths containing ".." are rejected, and resolved paths are verified to
//! remain within the base directory.

use super::{StorageBackend, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File system storage backend
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

impl FileSystemStorageBackend {
    /// Create a new file system storage backend
    ///
    /// All file operations are restricted to `base_path`. The directory does
    /// not need to exist yet; the first write creates it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_medallion::storage::FileSystemStorageBackend;
    ///
    /// let backend = FileSystemStorageBackend::new("/opt/pipeline/data");
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve a path relative to the base path with security checks.
    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let normalized = path.trim_start_matches('/');

        if normalized.contains("..") {
            return Err(StorageError::PermissionDenied(
                "Path traversal (..) not allowed".to_string(),
            ));
        }

        let full = self.base_path.join(normalized);

        for component in full.components() {
            if matches!(component, Component::ParentDir) {
                return Err(StorageError::PermissionDenied(
                    "Path traversal not allowed".to_string(),
                ));
            }
        }

        if full.exists() {
            let canonical = full
                .canonicalize()
                .map_err(|e| StorageError::IoError(format!("Failed to resolve path: {}", e)))?;
            self.ensure_contained(&canonical)?;
            return Ok(canonical);
        }

        // Non-existing paths are returned as-is once the parent checks out
        if let Some(parent) = full.parent() {
            if parent.exists() {
                let parent_canonical = parent.canonicalize().map_err(|e| {
                    StorageError::IoError(format!("Failed to resolve parent path: {}", e))
                })?;
                self.ensure_contained(&parent_canonical)?;
            }
        }

        Ok(full)
    }

    fn ensure_contained(&self, canonical: &Path) -> Result<(), StorageError> {
        let base_canonical = self
            .base_path
            .canonicalize()
            .unwrap_or_else(|_| self.base_path.clone());

        if !canonical.starts_with(&base_canonical) {
            return Err(StorageError::PermissionDenied(
                "Path escapes base directory".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for FileSystemStorageBackend {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve_path(path)?;

        fs::read(&full_path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::FileNotFound(path.to_string())
            } else {
                StorageError::IoError(format!("Failed to read file {}: {}", path, e))
            }
        })
    }

    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!("Failed to create directory for {}: {}", path, e))
            })?;
        }

        debug!(path = %full_path.display(), bytes = content.len(), "Writing file");
        fs::write(&full_path, content)
            .map_err(|e| StorageError::IoError(format!("Failed to write file {}: {}", path, e)))
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve_path(path)?;

        match fs::metadata(&full_path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(format!(
                "Failed to check file existence {}: {}",
                path, e
            ))),
        }
    }

    fn create_dir(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;

        fs::create_dir_all(&full_path).map_err(|e| {
            StorageError::IoError(format!("Failed to create directory {}: {}", path, e))
        })
    }
}

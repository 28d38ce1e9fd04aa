//! Domain errors raised by inventory operations.
//!
//! All errors use a `thiserror`-derived enum with structured context so callers
//! can inspect the failure programmatically. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from coordinate, manifest, registry, and scan operations.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// A coordinate field was missing or malformed.
    #[error("invalid coordinate: {field} {reason}")]
    InvalidCoordinate {
        /// Name of the offending field.
        field: &'static str,
        /// Why the field was rejected.
        reason: String,
    },

    /// A plugin language classification was not recognised.
    #[error("unknown plugin language '{language}'")]
    InvalidLanguage {
        /// Text that failed to parse.
        language: String,
    },

    /// No directory exists for the requested version.
    #[error("version '{version}' is not installed under {}", plugin_dir.display())]
    VersionNotInstalled {
        /// Plugin directory that was inspected.
        plugin_dir: PathBuf,
        /// Version that was requested.
        version: String,
    },

    /// The directory passed to a scan does not exist.
    #[error("plugins root not found: {}", path.display())]
    RootNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// A registry entry failed validation.
    #[error("registry error: {message}")]
    Registry {
        /// Description of the validation failure.
        message: String,
    },

    /// A persisted document could not be decoded or encoded.
    #[error("malformed document {}: {message}", path.display())]
    Manifest {
        /// File that was being read or written.
        path: PathBuf,
        /// Description of the codec failure.
        message: String,
    },

    /// An I/O error occurred while touching the plugin tree or a data file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl InventoryError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn invalid_coordinate(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            field,
            reason: reason.into(),
        }
    }
}

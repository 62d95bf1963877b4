//! Error types.
//!
//! [`CatalogError`] is fatal for a single catalog: the pipeline for that
//! catalog stops, other catalogs continue. [`MarkerError`] is never surfaced to
//! callers; a marker file that fails to probe simply does not provide a
//! namespace.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for catalog processing.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Fatal, per-catalog failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot extract a file name from {path}")]
    MissingFileName { path: PathBuf },

    #[error("unsupported catalog extension '{extension}' for {path}")]
    UnsupportedExtension { path: PathBuf, extension: String },
}

impl CatalogError {
    /// Convenience constructor for an unreadable root.
    #[must_use]
    pub fn root_unreadable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::RootUnreadable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::RootUnreadable { path, .. }
            | Self::MissingFileName { path }
            | Self::UnsupportedExtension { path, .. } => path,
        }
    }
}

/// Why a marker file did not yield a namespace flag.
///
/// Always recoverable: the walker treats every variant as "not a namespace".
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("marker is not valid JSON of the expected shape: {0}")]
    Json(#[from] serde_json::Error),
}

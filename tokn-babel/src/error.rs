//! Error types for format operations and builds

use std::path::PathBuf;
use thiserror::Error;
use tokn_core::{DocumentError, ResolveError};

/// Errors raised by formats and the format registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No format registered under this name
    #[error("Format not found: {0}")]
    FormatNotFound(String),

    /// The format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// A token reference could not be resolved while serializing
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Errors that abort a build. No output is written when any of these occur during `build`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build root holds files but neither output directory.
    #[error("Refusing to replace {}: it does not look like a previous build", path.display())]
    ForeignRoot { path: PathBuf },
}

impl From<ResolveError> for BuildError {
    fn from(err: ResolveError) -> Self {
        BuildError::Format(FormatError::Resolve(err))
    }
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// The resolution failure behind this error, if any.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            BuildError::Format(FormatError::Resolve(err)) => Some(err),
            _ => None,
        }
    }
}

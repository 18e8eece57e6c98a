//! Typed error definitions for vfs_move.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use thiserror::Error;

use crate::path::UPath;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Identical source and target: {0}")]
    IdenticalPath(String),

    #[error("Target already exists: {0}")]
    TargetAlreadyExists(String),

    #[error("Cannot delete non-empty directory: {0}")]
    NonEmptyDirectory(String),

    #[error("{op} '{path}': {source}")]
    Backend {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VfsError>;

impl VfsError {
    pub(crate) fn invalid_path(path: impl ToString, reason: impl Into<String>) -> Self {
        VfsError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors that come from the backing filesystem rather than the caller.
    pub fn is_backend(&self) -> bool {
        matches!(self, VfsError::Backend { .. })
    }
}

/// Adapter for `.map_err(...)`: wraps a backend io::Error with the operation and path.
pub(crate) fn backend_error<'a>(
    op: &'static str,
    path: &'a UPath,
) -> impl FnOnce(io::Error) -> VfsError + 'a {
    move |source: io::Error| VfsError::Backend {
        op,
        path: path.to_string(),
        source,
    }
}

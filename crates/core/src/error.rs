//! Domain error model.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Everything that can go wrong while bringing the catalog into memory. None of
/// these are recoverable at runtime: the catalog is loaded once, before serving.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON or has the wrong shape.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record failed validation (e.g. negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. a fractional number).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two records share the same identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

impl DomainError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

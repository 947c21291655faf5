//! Top-level error type for `tpe_core`.
//!
//! Mirrors the error kinds so that `tpe_db` and `tpe_server` can map a
//! single `CoreError` to an HTTP status without re-deriving the mapping.
use thiserror::Error;

/// The caller-visible classification of a [`CoreError`], independent of its
/// English message. `tpe_server::err` switches on this to pick a status code.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailure,
    InvariantConflict,
    DrawFailure,
}

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    ValidationFailure(String),

    #[error("{0}")]
    InvariantConflict(String),

    #[error("draw could not satisfy its constraints: {0}")]
    DrawFailure(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::ValidationFailure(_) => ErrorKind::ValidationFailure,
            CoreError::InvariantConflict(_) => ErrorKind::InvariantConflict,
            CoreError::DrawFailure(_) => ErrorKind::DrawFailure,
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        CoreError::NotFound(entity.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        CoreError::InvariantConflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::ValidationFailure(msg.into())
    }
}

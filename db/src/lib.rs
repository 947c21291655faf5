//! Persistence and orchestration for the tournament progression engine.
//!
//! `tpe_core` holds pure domain types and algorithms; this crate loads rows
//! through sqlx, hands them to `tpe_core`'s pure functions, and writes the
//! results back inside a transaction. A server handler calls a function
//! here, never `tpe_core` directly, for anything that touches the database.
use thiserror::Error;

pub mod competition;
pub mod county;
pub mod events;
pub mod lifecycle;
pub mod match_;
pub mod models;
pub mod pool;
pub mod qualification;
pub mod region;
pub mod result;
pub mod scheduler;
pub mod season;
pub mod standing;
pub mod standings;
pub mod team;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("missing 'DATABASE_URL'")]
    DbUrlMissing,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("stored row could not be decoded: {0}")]
    Decode(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Core(#[from] tpe_core::error::CoreError),
}

impl DbError {
    /// Maps onto the same classification `tpe_core::error::ErrorKind`
    /// uses, so `tpe_server::err` can pick a status code without a second
    /// switch for storage-layer failures.
    pub fn kind(&self) -> tpe_core::error::ErrorKind {
        match self {
            DbError::Core(e) => e.kind(),
            DbError::Decode(_) => tpe_core::error::ErrorKind::ValidationFailure,
            DbError::Conflict(_) => tpe_core::error::ErrorKind::InvariantConflict,
            DbError::DbUrlMissing | DbError::Sqlx(_) => tpe_core::error::ErrorKind::InvariantConflict,
        }
    }
}

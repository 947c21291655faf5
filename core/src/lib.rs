#![forbid(unsafe_code)]
#![warn(
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

//! Pure domain types and algorithms for the tournament progression engine.
//!
//! This crate holds no I/O: no SQL, no async runtime, no HTTP. Everything
//! here is a data type or a deterministic function over data types, so it
//! can be exercised with plain `#[test]`s and reused unchanged by whichever
//! concrete storage/transport layer wraps it (see `tpe_db`, `tpe_server`).

use crate::utils::serde_date;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

pub mod actor;
pub mod bracket;
pub mod competition;
pub mod county;
pub mod error;
pub mod fixture;
pub mod game;
pub mod ids;
pub mod qualification;
pub mod region;
pub mod result;
pub mod scheduler;
pub mod season;
pub mod standing;
pub mod standings;
pub mod team;
pub mod utils;

/// A point in time with a fixed UTC offset, as stored and exchanged across
/// the whole crate.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(#[serde(with = "serde_date")] DateTime<FixedOffset>);

impl Date {
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    pub fn inner(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// The current wall-clock time, for the server's timestamping of
    /// writes (`created_at`, standings `updated_at`, ...).
    pub fn now() -> Self {
        Self(chrono::Utc::now().into())
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn mock() -> Self {
        let dt = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .unwrap();
        Self(dt)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

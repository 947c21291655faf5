//! Internal identifiers for every entity in the data model.
//!
//! Each id is a thin wrapper around `i64` (SQLite `INTEGER PRIMARY KEY`),
//! built with the same `derive_more`-based newtype pattern throughout, so
//! that a `TeamId` and a `CompetitionId` are never accidentally
//! interchangeable at a call site.
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug,
            Display,
            Deserialize,
            Serialize,
            Clone,
            Copy,
            Eq,
            PartialEq,
            Hash,
            Ord,
            PartialOrd,
            From,
            Into,
        )]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }
    };
}

id_type!(RegionId);
id_type!(CountyId);
id_type!(SeasonId);
id_type!(TeamId);
id_type!(CompetitionId);
id_type!(MatchId);
id_type!(UserId);

//! Team — the unit that participates in matches and standings.
use crate::error::CoreError;
use crate::ids::{CountyId, RegionId, TeamId};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq)]
#[as_ref(forward)]
pub struct TeamName(String);

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum TeamCategory {
    Men,
    Women,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum TeamStatus {
    Pending,
    Active,
    Suspended,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
    pub county_id: CountyId,
    pub region_id: RegionId,
    pub category: TeamCategory,
    pub status: TeamStatus,
}

impl Team {
    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// Enforces that `region_id` matches the owning county's region, per
    /// the data model's invariant.
    pub fn try_new(
        id: TeamId,
        name: impl Into<String>,
        county_id: CountyId,
        region_id: RegionId,
        county_region_id: RegionId,
        category: TeamCategory,
        status: TeamStatus,
    ) -> Result<Self, CoreError> {
        if region_id != county_region_id {
            return Err(CoreError::validation(
                "team region_id must equal its county's region_id",
            ));
        }
        Ok(Team {
            id,
            name: TeamName(name.into()),
            county_id,
            region_id,
            category,
            status,
        })
    }
}

/// A team as seen by the scheduling algorithms in [`crate::scheduler`], which
/// only ever need identity and the facts that drive pairing/grouping
/// constraints (county, for round-robin travel cost; region, for group
/// draws).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTeam {
    pub id: TeamId,
    pub county_id: CountyId,
    pub region_id: RegionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_region() {
        let err = Team::try_new(
            TeamId::new(1),
            "Rovers",
            CountyId::new(1),
            RegionId::new(1),
            RegionId::new(2),
            TeamCategory::Men,
            TeamStatus::Active,
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ValidationFailure);
    }

    #[test]
    fn accepts_matching_region() {
        assert!(Team::try_new(
            TeamId::new(1),
            "Rovers",
            CountyId::new(1),
            RegionId::new(1),
            RegionId::new(1),
            TeamCategory::Men,
            TeamStatus::Active,
        )
        .is_ok());
    }
}

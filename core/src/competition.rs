//! Competition — the unit that owns fixtures and standings.
use crate::error::CoreError;
use crate::ids::{CompetitionId, CountyId, RegionId, SeasonId};
use crate::team::TeamCategory;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq)]
#[as_ref(forward)]
pub struct CompetitionName(String);

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum CompetitionType {
    Regional,
    National,
    Cup,
    Super,
    County,
}

impl CompetitionType {
    /// Whether this competition type admits a league (round-robin) schedule.
    pub fn permits_league_play(&self) -> bool {
        matches!(self, CompetitionType::Regional | CompetitionType::County)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: CompetitionName,
    pub kind: CompetitionType,
    pub category: TeamCategory,
    pub season_id: SeasonId,
    pub region_id: Option<RegionId>,
    pub county_id: Option<CountyId>,
}

impl Competition {
    /// Fallible constructor enforcing the COUNTY/REGIONAL scoping invariant:
    /// a COUNTY competition carries both county_id and region_id; a REGIONAL
    /// competition carries region_id only; NATIONAL/CUP/SUPER carry neither.
    pub fn try_new(
        id: CompetitionId,
        name: impl Into<String>,
        kind: CompetitionType,
        category: TeamCategory,
        season_id: SeasonId,
        region_id: Option<RegionId>,
        county_id: Option<CountyId>,
    ) -> Result<Self, CoreError> {
        validate_scope(kind, region_id, county_id)?;
        Ok(Competition {
            id,
            name: CompetitionName(name.into()),
            kind,
            category,
            season_id,
            region_id,
            county_id,
        })
    }
}

pub fn validate_scope(
    kind: CompetitionType,
    region_id: Option<RegionId>,
    county_id: Option<CountyId>,
) -> Result<(), CoreError> {
    match kind {
        CompetitionType::County => {
            if region_id.is_none() || county_id.is_none() {
                return Err(CoreError::validation(
                    "a COUNTY competition requires both region_id and county_id",
                ));
            }
        }
        CompetitionType::Regional => {
            if region_id.is_none() {
                return Err(CoreError::validation(
                    "a REGIONAL competition requires region_id",
                ));
            }
            if county_id.is_some() {
                return Err(CoreError::validation(
                    "a REGIONAL competition must not have county_id",
                ));
            }
        }
        CompetitionType::National | CompetitionType::Cup | CompetitionType::Super => {
            if region_id.is_some() || county_id.is_some() {
                return Err(CoreError::validation(
                    "NATIONAL/CUP/SUPER competitions must not be region/county scoped",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_requires_both_scopes() {
        assert!(validate_scope(CompetitionType::County, None, None).is_err());
        assert!(validate_scope(CompetitionType::County, Some(RegionId::new(1)), None).is_err());
        assert!(validate_scope(
            CompetitionType::County,
            Some(RegionId::new(1)),
            Some(CountyId::new(1))
        )
        .is_ok());
    }

    #[test]
    fn regional_rejects_county_scope() {
        assert!(validate_scope(
            CompetitionType::Regional,
            Some(RegionId::new(1)),
            Some(CountyId::new(1))
        )
        .is_err());
        assert!(validate_scope(CompetitionType::Regional, Some(RegionId::new(1)), None).is_ok());
    }

    #[test]
    fn national_rejects_any_scope() {
        assert!(validate_scope(CompetitionType::National, Some(RegionId::new(1)), None).is_err());
        assert!(validate_scope(CompetitionType::National, None, None).is_ok());
    }
}

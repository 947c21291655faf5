//! Season — at most one is active at any time.
use crate::error::CoreError;
use crate::ids::SeasonId;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq)]
#[as_ref(forward)]
pub struct SeasonName(String);

#[derive(
    Display, Debug, Clone, Copy, From, Into, Deserialize, Serialize, PartialEq, Eq, Ord, PartialOrd,
)]
pub struct SeasonYear(i32);

impl SeasonYear {
    pub const MIN: i32 = 2000;
    pub const MAX: i32 = 2100;

    pub fn try_new(year: i32) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(SeasonYear(year))
        } else {
            Err(CoreError::validation(format!(
                "season year {} outside {}..={}",
                year,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Season {
    pub id: SeasonId,
    pub name: SeasonName,
    pub year: SeasonYear,
    pub is_active: bool,
    pub created_at: crate::Date,
}

impl Season {
    pub fn new(
        id: SeasonId,
        name: impl Into<String>,
        year: SeasonYear,
        is_active: bool,
        created_at: crate::Date,
    ) -> Self {
        Season {
            id,
            name: SeasonName(name.into()),
            year,
            is_active,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_year_outside_range() {
        assert!(SeasonYear::try_new(1999).is_err());
        assert!(SeasonYear::try_new(2101).is_err());
        assert!(SeasonYear::try_new(2024).is_ok());
    }
}

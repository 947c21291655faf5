//! Region — the top level of the Region ⊃ County ⊃ Team forest.
use crate::error::CoreError;
use crate::ids::RegionId;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[as_ref(forward)]
pub struct RegionName(String);

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[as_ref(forward)]
pub struct RegionCode(String);

impl RegionCode {
    /// 2–3 character region codes, per the data model.
    pub fn try_new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if (2..=3).contains(&code.len()) {
            Ok(RegionCode(code))
        } else {
            Err(CoreError::validation(format!(
                "region code {:?} must be 2-3 characters",
                code
            )))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: RegionName,
    pub code: RegionCode,
    pub created_at: crate::Date,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>, code: RegionCode, created_at: crate::Date) -> Self {
        Region {
            id,
            name: RegionName(name.into()),
            code,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_too_short_code() {
        assert!(RegionCode::try_new("A").is_err());
    }

    #[test]
    fn accepts_two_and_three_char_codes() {
        assert!(RegionCode::try_new("AB").is_ok());
        assert!(RegionCode::try_new("ABC").is_ok());
        assert!(RegionCode::try_new("ABCD").is_err());
    }
}

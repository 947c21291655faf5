//! County — belongs to exactly one [`crate::region::Region`].
use crate::ids::{CountyId, RegionId};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Display, Debug, Clone, AsRef, From, Into, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[as_ref(forward)]
pub struct CountyName(String);

#[derive(
    Display, Debug, Clone, Copy, From, Into, Deserialize, Serialize, PartialEq, Eq, Hash, Ord, PartialOrd,
)]
pub struct CountyCode(i64);

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct County {
    pub id: CountyId,
    pub name: CountyName,
    pub code: CountyCode,
    pub region_id: RegionId,
    pub created_at: crate::Date,
}

impl County {
    pub fn new(
        id: CountyId,
        name: impl Into<String>,
        code: CountyCode,
        region_id: RegionId,
        created_at: crate::Date,
    ) -> Self {
        County {
            id,
            name: CountyName(name.into()),
            code,
            region_id,
            created_at,
        }
    }
}

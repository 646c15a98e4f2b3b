use super::GroupId;
use serde::{Deserialize, Serialize};

/// One batch of students within a single academic year, e.g. `SY-B1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

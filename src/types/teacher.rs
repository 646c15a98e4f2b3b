use super::TeacherId;
use serde::{Deserialize, Serialize};

/// A teaching resource, unique by name within a `Dataset`. The name alone
/// is the identifier — `DataBuilder` synthesizes it as `Teacher-{subject}`
/// for lectures and `Lab-{lab_name or subject}` for labs, so two classes
/// sharing a teacher name are understood to share the same teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub index: usize,
}

impl Teacher {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            id: TeacherId(name.into()),
            index,
        }
    }
}

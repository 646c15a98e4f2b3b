use super::{ClassId, GroupId, RoomId, TeacherId};
use serde::{Deserialize, Serialize};

/// Whether a class is a single-slot lecture or a multi-slot lab block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Lecture,
    Lab,
}

/// One weekly session of a subject for one or more groups. `allowed_rooms`
/// is always a subset of the `Dataset`'s rooms of matching kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub subject: String,
    pub teacher: TeacherId,
    pub kind: ClassKind,
    pub duration: usize,
    pub groups: Vec<GroupId>,
    pub allowed_rooms: Vec<RoomId>,
    /// For a lab class, the room resolved by `DataBuilder` from
    /// `lab_name`/`lab_names[i]`/the first lab room in the pool. `None`
    /// for lecture classes, which have no preferred-room concept.
    pub preferred_room: Option<RoomId>,
}

impl Class {
    pub fn new(
        id: ClassId,
        subject: impl Into<String>,
        teacher: TeacherId,
        kind: ClassKind,
        duration: usize,
        groups: Vec<GroupId>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            teacher,
            kind,
            duration,
            groups,
            allowed_rooms: Vec::new(),
            preferred_room: None,
        }
    }

    pub fn shares_group(&self, other: &Class) -> bool {
        self.groups.iter().any(|g| other.groups.contains(g))
    }
}

use super::RoomId;
use serde::{Deserialize, Serialize};

/// Kind of a physical room. Mixed allocations are rejected at the type
/// level: a lab `Class` only ever carries `RoomKind::Lab` rooms in its
/// `allowed_rooms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Lecture,
    Lab,
}

/// A physical location, one lecture room or one lab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub kind: RoomKind,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

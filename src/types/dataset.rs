use super::{Class, ClassId, Group, GroupId, Room, RoomId, RoomKind, Teacher, TeacherId};
use serde::{Deserialize, Serialize};

/// Per-year bundle produced once by `DataBuilder` and read-only thereafter,
/// except for `Class.allowed_rooms` resolution performed while building it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub rooms: Vec<Room>,
    pub groups: Vec<Group>,
    pub teachers: Vec<Teacher>,
    pub classes: Vec<Class>,
}

impl Dataset {
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.kind == kind)
    }

    pub fn teacher_index(&self, id: &TeacherId) -> Option<usize> {
        self.teachers.iter().position(|t| &t.id == id)
    }
}

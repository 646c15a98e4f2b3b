use crate::types::{
    Class, ClassId, ClassKind, Config, Dataset, Group, GroupId, Room, RoomId, RoomKind, Teacher,
    TeacherId, Year,
};
use std::collections::HashMap;

/// Builds the rooms for one run: `num_classrooms` lecture rooms first,
/// then `num_labs` labs named from `lab_names` where provided.
fn build_rooms(num_classrooms: i64, num_labs: i64, lab_names: Option<&[String]>) -> Vec<Room> {
    let mut rooms = Vec::new();
    let classroom_count = num_classrooms.max(0) as usize;
    let lab_count = num_labs.max(0) as usize;

    for i in 0..classroom_count {
        rooms.push(Room::new(RoomId(rooms.len()), format!("CR-{}", i + 1), RoomKind::Lecture));
    }
    for i in 0..lab_count {
        let name = lab_names
            .and_then(|names| names.get(i))
            .cloned()
            .unwrap_or_else(|| format!("Lab-{}", i + 1));
        rooms.push(Room::new(RoomId(rooms.len()), name, RoomKind::Lab));
    }
    rooms
}

struct TeacherPool {
    teachers: Vec<Teacher>,
    index: HashMap<TeacherId, usize>,
}

impl TeacherPool {
    fn new() -> Self {
        Self {
            teachers: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn ensure(&mut self, name: &str) -> TeacherId {
        let id = TeacherId(name.to_string());
        if !self.index.contains_key(&id) {
            let idx = self.teachers.len();
            self.teachers.push(Teacher::new(name, idx));
            self.index.insert(id.clone(), idx);
        }
        id
    }
}

/// Expands `config`'s declarative subject list for `year` into a concrete
/// `Dataset`: rooms, groups, teachers, and one `Class` per group per
/// weekly session. Malformed numeric fields (negative or unparsable, here
/// represented simply as values `<= 0`) coerce to zero and are skipped —
/// this function never fails.
pub fn build_dataset(config: &Config, year: Year) -> Dataset {
    let rooms = build_rooms(
        config.num_classrooms,
        config.num_labs,
        config.lab_names.as_deref(),
    );

    let batch_count = config.batch_count(year);
    let mut groups = Vec::with_capacity(batch_count);
    for b in 0..batch_count {
        groups.push(Group::new(GroupId(b), format!("{}-B{}", year.key(), b + 1)));
    }

    let lecture_rooms: Vec<RoomId> = rooms
        .iter()
        .filter(|r| r.kind == RoomKind::Lecture)
        .map(|r| r.id)
        .collect();
    let lab_rooms: Vec<RoomId> = rooms
        .iter()
        .filter(|r| r.kind == RoomKind::Lab)
        .map(|r| r.id)
        .collect();
    let lab_room_by_name: HashMap<&str, RoomId> = rooms
        .iter()
        .filter(|r| r.kind == RoomKind::Lab)
        .map(|r| (r.name.as_str(), r.id))
        .collect();

    let mut teachers = TeacherPool::new();
    let mut classes = Vec::new();
    let mut lab_subject_index = 0usize;

    let year_config = config.year(year);
    for subject in &year_config.subjects {
        let lec_sessions = subject.hours.max(0) as usize;
        if lec_sessions > 0 {
            let teacher = teachers.ensure(&format!("Teacher-{}", subject.name));
            for group in &groups {
                for _ in 0..lec_sessions {
                    let id = ClassId(classes.len());
                    let mut class = Class::new(
                        id,
                        subject.name.clone(),
                        teacher.clone(),
                        ClassKind::Lecture,
                        1,
                        vec![group.id],
                    );
                    class.allowed_rooms = lecture_rooms.clone();
                    classes.push(class);
                }
            }
        }

        let lab_sessions = subject.labs.max(0) as usize;
        if lab_sessions > 0 {
            let lab_label = subject.lab_name.clone().unwrap_or_else(|| subject.name.clone());
            let lab_duration = subject.lab_hours.max(1) as usize;
            let teacher = teachers.ensure(&format!("Lab-{}", lab_label));

            // Preferred room, matched in order: the room actually named
            // `lab_name`, then the room at this subject's position in
            // `lab_names`, then the lab room at that same position in the
            // pool, then simply the first lab room.
            let preferred_room = subject
                .lab_name
                .as_deref()
                .and_then(|name| lab_room_by_name.get(name).copied())
                .or_else(|| {
                    config
                        .lab_names
                        .as_ref()
                        .and_then(|names| names.get(lab_subject_index))
                        .and_then(|name| lab_room_by_name.get(name.as_str()).copied())
                })
                .or_else(|| lab_rooms.get(lab_subject_index).copied())
                .or_else(|| lab_rooms.first().copied());
            lab_subject_index += 1;

            for group in &groups {
                for _ in 0..lab_sessions {
                    let id = ClassId(classes.len());
                    let mut class = Class::new(
                        id,
                        lab_label.clone(),
                        teacher.clone(),
                        ClassKind::Lab,
                        lab_duration,
                        vec![group.id],
                    );
                    class.allowed_rooms = lab_rooms.clone();
                    class.preferred_room = preferred_room;
                    classes.push(class);
                }
            }
        }
    }

    Dataset {
        rooms,
        groups,
        teachers: teachers.teachers,
        classes,
    }
}

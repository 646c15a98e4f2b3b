use crate::error::Diagnostic;
use crate::scheduler::common::{block_cells, valid_teacher_group_row};
use crate::types::{
    Class, ClassId, ClassKind, Dataset, GroupId, PlacementState, Year, BREAK_SLOTS, DAYS_PER_WEEK,
    LAB_WINDOWS, SLOTS_PER_DAY,
};
use std::collections::HashMap;

/// Per (group, day) occupancy used for the daily lab limits: at most one
/// lab of the same subject, at most two labs in total.
#[derive(Default)]
struct DailyLabCounts {
    total: HashMap<(GroupId, usize), usize>,
    by_subject: HashMap<(GroupId, usize, String), usize>,
}

impl DailyLabCounts {
    fn allows(&self, group: GroupId, day: usize, subject: &str) -> bool {
        let total = self.total.get(&(group, day)).copied().unwrap_or(0);
        let same_subject = self
            .by_subject
            .get(&(group, day, subject.to_string()))
            .copied()
            .unwrap_or(0);
        total < 2 && same_subject < 1
    }

    fn record(&mut self, group: GroupId, day: usize, subject: &str) {
        *self.total.entry((group, day)).or_insert(0) += 1;
        *self
            .by_subject
            .entry((group, day, subject.to_string()))
            .or_insert(0) += 1;
    }
}

/// Phase A: places every lab `Class` before any lecture, honoring
/// multi-slot continuity and the two canonical lab windows.
pub fn place_labs(
    dataset: &Dataset,
    state: &mut PlacementState,
    year: Year,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut lab_ids: Vec<ClassId> = dataset
        .classes
        .iter()
        .filter(|c| c.kind == ClassKind::Lab)
        .map(|c| c.id)
        .collect();
    lab_ids.sort_by(|a, b| {
        let ca = dataset.class(*a);
        let cb = dataset.class(*b);
        cb.duration
            .cmp(&ca.duration)
            .then_with(|| ca.subject.cmp(&cb.subject))
    });

    let mut counts = DailyLabCounts::default();
    let mut required: HashMap<(String, GroupId), usize> = HashMap::new();
    let mut scheduled: HashMap<(String, GroupId), usize> = HashMap::new();
    for &id in &lab_ids {
        let class = dataset.class(id);
        for &g in &class.groups {
            *required.entry((class.subject.clone(), g)).or_insert(0) += 1;
        }
    }

    let mut still_unplaced = Vec::new();
    for id in lab_ids {
        let class = dataset.class(id).clone();
        let placed = try_preferred_room(dataset, state, &class, id, &mut counts)
            || try_fallback_rooms(dataset, state, &class, id, &mut counts);
        if placed {
            for &g in &class.groups {
                *scheduled.entry((class.subject.clone(), g)).or_insert(0) += 1;
            }
        } else {
            still_unplaced.push(id);
        }
    }

    // Final retry: a last scan across every day, window, and lab room,
    // ignoring the per-day lab-count limits that gated the two passes above.
    for id in still_unplaced {
        let class = dataset.class(id).clone();
        if try_final_retry(dataset, state, &class, id, &mut counts) {
            for &g in &class.groups {
                *scheduled.entry((class.subject.clone(), g)).or_insert(0) += 1;
            }
        } else {
            diagnostics.push(Diagnostic::UnplacedClass {
                year,
                class: id,
                subject: class.subject.clone(),
            });
        }
    }

    for ((subject, group), req) in required {
        let sched = scheduled.get(&(subject.clone(), group)).copied().unwrap_or(0);
        if sched < req {
            diagnostics.push(Diagnostic::QuotaShortfall {
                year,
                subject,
                group,
                required: req,
                scheduled: sched,
            });
        }
    }
}

/// Pass 1: day outer, window inner, the single room `DataBuilder` resolved
/// as this lab's preferred room. A no-op if the class has none.
fn try_preferred_room(
    dataset: &Dataset,
    state: &mut PlacementState,
    class: &Class,
    class_id: ClassId,
    counts: &mut DailyLabCounts,
) -> bool {
    let Some(room) = class.preferred_room else {
        return false;
    };
    for day in 0..DAYS_PER_WEEK {
        if !class.groups.iter().all(|&g| counts.allows(g, day, &class.subject)) {
            continue;
        }
        if try_window(dataset, state, class, class_id, day, room.0, counts) {
            return true;
        }
    }
    false
}

/// Pass 2: every other allowed room in turn (fallback reassignment), each
/// tried day outer / window inner, same daily-limit gating as pass 1.
fn try_fallback_rooms(
    dataset: &Dataset,
    state: &mut PlacementState,
    class: &Class,
    class_id: ClassId,
    counts: &mut DailyLabCounts,
) -> bool {
    for &room in &class.allowed_rooms {
        if Some(room) == class.preferred_room {
            continue;
        }
        for day in 0..DAYS_PER_WEEK {
            if !class.groups.iter().all(|&g| counts.allows(g, day, &class.subject)) {
                continue;
            }
            if try_window(dataset, state, class, class_id, day, room.0, counts) {
                return true;
            }
        }
    }
    false
}

/// Pass 3: final retry for classes the first two passes couldn't seat —
/// day outer, window inner, every lab room inner, ignoring the per-day lab
/// count limits entirely.
fn try_final_retry(
    dataset: &Dataset,
    state: &mut PlacementState,
    class: &Class,
    class_id: ClassId,
    counts: &mut DailyLabCounts,
) -> bool {
    for day in 0..DAYS_PER_WEEK {
        for window in LAB_WINDOWS {
            if class.duration > window.len() {
                continue;
            }
            let start_row = day * SLOTS_PER_DAY + window[0];
            for &room in &class.allowed_rooms {
                if candidate_ok(dataset, state, class, start_row, room.0) {
                    let cells = block_cells(start_row, room.0, class.duration);
                    state.place(dataset, class_id, cells);
                    for &g in &class.groups {
                        counts.record(g, day, &class.subject);
                    }
                    return true;
                }
            }
        }
    }
    false
}

/// Tries every valid window at `(day, room)`, committing and recording the
/// first one that checks out. Shared by passes 1 and 2.
fn try_window(
    dataset: &Dataset,
    state: &mut PlacementState,
    class: &Class,
    class_id: ClassId,
    day: usize,
    room: usize,
    counts: &mut DailyLabCounts,
) -> bool {
    for window in LAB_WINDOWS {
        if class.duration > window.len() {
            continue;
        }
        let start_row = day * SLOTS_PER_DAY + window[0];
        if candidate_ok(dataset, state, class, start_row, room) {
            let cells = block_cells(start_row, room, class.duration);
            state.place(dataset, class_id, cells);
            for &g in &class.groups {
                counts.record(g, day, &class.subject);
            }
            return true;
        }
    }
    false
}

fn candidate_ok(
    dataset: &Dataset,
    state: &PlacementState,
    class: &crate::types::Class,
    start_row: usize,
    col: usize,
) -> bool {
    let cells = block_cells(start_row, col, class.duration);
    if cells.iter().any(|&(r, c)| !state.free.contains(&(r, c))) {
        return false;
    }
    let day = start_row / SLOTS_PER_DAY;
    if cells
        .iter()
        .any(|&(r, _)| BREAK_SLOTS.contains(&(r - day * SLOTS_PER_DAY)))
    {
        return false;
    }
    // cross-batch lab exclusivity: no other batch may already hold this
    // room for any slot in range (implied by FreeSet membership since a
    // lab room column is only ever occupied by one class at a time).
    cells
        .iter()
        .all(|&(r, _)| valid_teacher_group_row(dataset, state, class, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;

    fn config_with_lab(batches: i64, labs: i64, lab_hours: i64, num_labs: i64) -> crate::types::Config {
        use crate::types::{SubjectConfig, Year, YearConfig};
        use std::collections::BTreeMap;
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Physics".to_string(),
                    hours: 0,
                    labs,
                    lab_name: None,
                    lab_hours,
                }],
            },
        );
        let mut batch_map = BTreeMap::new();
        batch_map.insert(Year::Sy, batches);
        crate::types::Config {
            num_classrooms: 0,
            num_labs,
            lab_names: None,
            batches: batch_map,
            timings: Default::default(),
            years,
        }
    }

    #[test]
    fn places_lab_inside_a_canonical_window() {
        let cfg = config_with_lab(1, 1, 2, 1);
        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_labs(&ds, &mut state, Year::Sy, &mut diags);

        assert_eq!(state.filled.len(), 1);
        let cells = state.filled.values().next().unwrap();
        let first_row = cells[0].0;
        let slot = first_row % SLOTS_PER_DAY;
        assert!(LAB_WINDOWS.iter().any(|w| w[0] == slot));
    }

    #[test]
    fn two_batches_sharing_one_lab_land_on_different_windows() {
        let cfg = config_with_lab(2, 1, 2, 1);
        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_labs(&ds, &mut state, Year::Sy, &mut diags);

        let starts: Vec<usize> = state.filled.values().map(|c| c[0].0).collect();
        assert_eq!(starts.len(), 2);
        assert_ne!(starts[0], starts[1]);
    }

    #[test]
    fn preferred_room_resolves_positionally_when_lab_name_does_not_match_any_room() {
        use crate::types::{SubjectConfig, Year, YearConfig};
        use std::collections::BTreeMap;

        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Programming Fundamentals".to_string(),
                    hours: 0,
                    labs: 1,
                    lab_name: Some("Programming Lab".to_string()),
                    lab_hours: 2,
                }],
            },
        );
        let mut batches = BTreeMap::new();
        batches.insert(Year::Sy, 1);
        let cfg = crate::types::Config {
            num_classrooms: 0,
            num_labs: 2,
            lab_names: Some(vec!["Lab A".to_string(), "Lab B".to_string()]),
            batches,
            timings: Default::default(),
            years,
        };

        let ds = build_dataset(&cfg, Year::Sy);
        let class = ds.classes.iter().find(|c| c.kind == ClassKind::Lab).unwrap();
        // "Programming Lab" matches no actual room name, so resolution
        // falls back to this subject's position (0) in `lab_names`.
        let room = ds.rooms[class.preferred_room.unwrap().0].name.clone();
        assert_eq!(room, "Lab A");
    }

    #[test]
    fn fallback_room_pass_engages_once_the_preferred_room_is_full() {
        use crate::types::{SubjectConfig, Year, YearConfig};
        use std::collections::BTreeMap;

        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Chemistry".to_string(),
                    hours: 0,
                    labs: 1,
                    lab_name: Some("X".to_string()),
                    lab_hours: 1,
                }],
            },
        );
        let mut batches = BTreeMap::new();
        // Ten groups exactly fill room X's ten weekly day/window slots
        // (5 days x 2 windows, duration 1); the eleventh must fall back.
        batches.insert(Year::Sy, 11);
        let cfg = crate::types::Config {
            num_classrooms: 0,
            num_labs: 2,
            lab_names: Some(vec!["X".to_string(), "Y".to_string()]),
            batches,
            timings: Default::default(),
            years,
        };

        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_labs(&ds, &mut state, Year::Sy, &mut diags);

        assert_eq!(state.filled.len(), 11);
        let room_y_col = ds.rooms.iter().find(|r| r.name == "Y").unwrap().id.0;
        assert!(state.filled.values().any(|cells| cells[0].1 == room_y_col));
    }
}

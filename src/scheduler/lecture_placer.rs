use crate::error::Diagnostic;
use crate::scheduler::common::valid_teacher_group_row;
use crate::types::{
    ClassId, ClassKind, Dataset, GroupId, PlacementState, Year, PREFERRED_LECTURE_SLOTS,
    SLOTS_PER_DAY,
};
use std::collections::{HashMap, HashSet};

/// Phase B: places every lecture `Class` (always duration 1) into the
/// remaining `FreeSet`, respecting teacher/group exclusivity and a soft
/// per-day distribution target.
pub fn place_lectures(
    dataset: &Dataset,
    state: &mut PlacementState,
    year: Year,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let lecture_ids: Vec<ClassId> = dataset
        .classes
        .iter()
        .filter(|c| c.kind == ClassKind::Lecture)
        .map(|c| c.id)
        .collect();

    let target_per_day = ((lecture_ids.len() + 4) / 5).max(1);
    let mut day_counts = [0usize; 5];
    let mut daily_subject_group: HashSet<(String, GroupId, usize)> = HashSet::new();

    let mut required: HashMap<(String, GroupId), usize> = HashMap::new();
    for &id in &lecture_ids {
        let class = dataset.class(id);
        for &g in &class.groups {
            *required.entry((class.subject.clone(), g)).or_insert(0) += 1;
        }
    }
    let mut scheduled: HashMap<(String, GroupId), usize> = HashMap::new();

    for id in lecture_ids {
        let placed = try_preferred(dataset, state, id, &target_per_day, &mut day_counts, &mut daily_subject_group)
            || try_fallback(dataset, state, id, &mut day_counts, &mut daily_subject_group);

        let class = dataset.class(id);
        if placed {
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

fn daily_limit_ok(
    class: &crate::types::Class,
    day: usize,
    daily_subject_group: &HashSet<(String, GroupId, usize)>,
) -> bool {
    class
        .groups
        .iter()
        .all(|&g| !daily_subject_group.contains(&(class.subject.clone(), g, day)))
}

fn commit(
    state: &mut PlacementState,
    dataset: &Dataset,
    id: ClassId,
    row: usize,
    col: usize,
    day: usize,
    day_counts: &mut [usize; 5],
    daily_subject_group: &mut HashSet<(String, GroupId, usize)>,
) {
    let class = dataset.class(id).clone();
    state.place(dataset, id, vec![(row, col)]);
    day_counts[day] += 1;
    for &g in &class.groups {
        daily_subject_group.insert((class.subject.clone(), g, day));
    }
}

fn try_preferred(
    dataset: &Dataset,
    state: &mut PlacementState,
    id: ClassId,
    target_per_day: &usize,
    day_counts: &mut [usize; 5],
    daily_subject_group: &mut HashSet<(String, GroupId, usize)>,
) -> bool {
    let class = dataset.class(id).clone();
    for day in 0..5 {
        if day_counts[day] >= *target_per_day {
            continue;
        }
        if !daily_limit_ok(&class, day, daily_subject_group) {
            continue;
        }
        for slot in PREFERRED_LECTURE_SLOTS {
            let row = day * SLOTS_PER_DAY + slot;
            for &room in &class.allowed_rooms {
                if !state.free.contains(&(row, room.0)) {
                    continue;
                }
                if !valid_teacher_group_row(dataset, state, &class, row) {
                    continue;
                }
                commit(state, dataset, id, row, room.0, day, day_counts, daily_subject_group);
                return true;
            }
        }
    }
    false
}

fn try_fallback(
    dataset: &Dataset,
    state: &mut PlacementState,
    id: ClassId,
    day_counts: &mut [usize; 5],
    daily_subject_group: &mut HashSet<(String, GroupId, usize)>,
) -> bool {
    let class = dataset.class(id).clone();
    let mut candidates: Vec<(usize, usize)> = state
        .free
        .iter()
        .copied()
        .filter(|&(_, col)| class.allowed_rooms.iter().any(|r| r.0 == col))
        .collect();
    candidates.sort_unstable();

    for (row, col) in candidates {
        let day = row / SLOTS_PER_DAY;
        if !daily_limit_ok(&class, day, daily_subject_group) {
            continue;
        }
        if !valid_teacher_group_row(dataset, state, &class, row) {
            continue;
        }
        commit(state, dataset, id, row, col, day, day_counts, daily_subject_group);
        return true;
    }
    false
}

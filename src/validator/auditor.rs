use crate::error::Diagnostic;
use crate::types::{Dataset, GroupId, PlacementState, Year, SLOTS_PER_DAY};
use std::collections::HashMap;

/// Global per-group weekly capacity, independent of room supply:
/// `5 * (slots_per_day - 2)` with the grid's fixed 12-slot day.
pub fn weekly_capacity() -> usize {
    let usable_slots_per_day = if SLOTS_PER_DAY >= 5 {
        SLOTS_PER_DAY - 2
    } else {
        SLOTS_PER_DAY.saturating_sub(1)
    };
    5 * usable_slots_per_day
}

/// Final-state audit over a year's `Dataset` and `Filled` map: counts
/// required vs. scheduled sessions per (subject, group) and enforces each
/// group's weekly capacity bound.
pub fn audit(dataset: &Dataset, state: &PlacementState, year: Year) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let mut required: HashMap<(String, GroupId), usize> = HashMap::new();
    for class in &dataset.classes {
        for &g in &class.groups {
            *required.entry((class.subject.clone(), g)).or_insert(0) += 1;
        }
    }

    let mut assigned: HashMap<(String, GroupId), usize> = HashMap::new();
    for &class_id in state.filled.keys() {
        let class = dataset.class(class_id);
        for &g in &class.groups {
            *assigned.entry((class.subject.clone(), g)).or_insert(0) += 1;
        }
    }

    for ((subject, group), req) in &required {
        let got = assigned.get(&(subject.clone(), *group)).copied().unwrap_or(0);
        if got < *req {
            diagnostics.push(Diagnostic::QuotaShortfall {
                year,
                subject: subject.clone(),
                group: *group,
                required: *req,
                scheduled: got,
            });
        }
    }

    let limit = weekly_capacity();
    let mut per_group_required: HashMap<GroupId, usize> = HashMap::new();
    for class in &dataset.classes {
        for &g in &class.groups {
            *per_group_required.entry(g).or_insert(0) += class.duration;
        }
    }
    for (group, required_slots) in per_group_required {
        if required_slots > limit {
            diagnostics.push(Diagnostic::CapacityExceeded {
                year,
                group,
                required: required_slots,
                limit,
            });
        }
    }

    diagnostics
}

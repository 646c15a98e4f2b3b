use crate::error::Diagnostic;
use crate::types::{Dataset, PlacementState, RoomKind, Slot, Year, SLOTS_PER_DAY, TOTAL_ROWS};
use std::collections::HashSet;

/// One year's final construction, as handed to the reconciler. Years
/// appear in a fixed priority order: earlier entries are immutable,
/// only `state` for the current entry under consideration is mutated.
pub struct YearEntry<'a> {
    pub year: Year,
    pub dataset: &'a Dataset,
    pub state: &'a mut PlacementState,
}

#[derive(Default, Clone)]
struct TakenAtRow {
    lecture: HashSet<usize>,
    lab: HashSet<usize>,
}

impl TakenAtRow {
    fn get(&self, kind: RoomKind) -> &HashSet<usize> {
        match kind {
            RoomKind::Lecture => &self.lecture,
            RoomKind::Lab => &self.lab,
        }
    }

    fn insert(&mut self, kind: RoomKind, col: usize) {
        match kind {
            RoomKind::Lecture => self.lecture.insert(col),
            RoomKind::Lab => self.lab.insert(col),
        };
    }
}

/// Relocates overlapping bookings after per-year construction so that no
/// physical room is double-booked across years sharing the pool. Earlier
/// years in `years` are never modified; only later years' matrices move.
pub fn reconcile(years: &mut [YearEntry]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for i in 0..years.len() {
        let taken = taken_by_row(&years[..i]);
        let entry = &mut years[i];
        let dataset = entry.dataset;
        let cols = dataset.rooms.len();

        for row in 0..TOTAL_ROWS {
            for col in 0..cols {
                let Some(class_id) = entry.state.matrix.get(row, col) else {
                    continue;
                };
                let is_block_start = row == 0 || entry.state.matrix.get(row - 1, col) != Some(class_id);
                if !is_block_start {
                    continue;
                }
                let kind = dataset.rooms[col].kind;
                if !taken[row].get(kind).contains(&col) {
                    continue;
                }

                let class = dataset.class(class_id).clone();
                let dur = class.duration;

                if let Some(new_col) = find_spatial_relocation(dataset, entry.state, &taken, row, dur, col, kind, &class.allowed_rooms) {
                    let new_cells: Vec<(usize, usize)> = (row..row + dur).map(|r| (r, new_col)).collect();
                    entry.state.unplace(dataset, class_id);
                    entry.state.place(dataset, class_id, new_cells);
                    continue;
                }

                if dur <= 3 {
                    if let Some(alt_start) = find_temporal_shift(entry.state, &taken, row, dur, col, kind) {
                        let new_cells: Vec<(usize, usize)> = (alt_start..alt_start + dur).map(|r| (r, col)).collect();
                        entry.state.unplace(dataset, class_id);
                        entry.state.place(dataset, class_id, new_cells);
                        continue;
                    }
                }

                diagnostics.push(Diagnostic::CrossYearConflict {
                    year: entry.year,
                    row,
                    message: "room conflict could not be resolved".to_string(),
                });
            }
        }
    }

    diagnostics
}

/// Per-row set of columns occupied by any of `earlier`, split by room
/// kind. Two columns with the same index across years conflict only when
/// they denote rooms of the same kind.
fn taken_by_row(earlier: &[YearEntry]) -> Vec<TakenAtRow> {
    let mut taken = vec![TakenAtRow::default(); TOTAL_ROWS];
    for entry in earlier {
        for row in 0..TOTAL_ROWS {
            for (col, _) in entry.state.matrix.occupied_in_row(row) {
                taken[row].insert(entry.dataset.rooms[col].kind, col);
            }
        }
    }
    taken
}

fn block_clear(
    state: &PlacementState,
    taken: &[TakenAtRow],
    rows: &[usize],
    col: usize,
    kind: RoomKind,
) -> bool {
    rows.iter()
        .all(|&r| state.matrix.get(r, col).is_none() && !taken[r].get(kind).contains(&col))
}

fn find_spatial_relocation(
    dataset: &Dataset,
    state: &PlacementState,
    taken: &[TakenAtRow],
    row: usize,
    dur: usize,
    current_col: usize,
    kind: RoomKind,
    allowed_rooms: &[crate::types::RoomId],
) -> Option<usize> {
    if row + dur > TOTAL_ROWS {
        return None;
    }
    let rows: Vec<usize> = (row..row + dur).collect();
    for room in allowed_rooms {
        if room.0 == current_col {
            continue;
        }
        if dataset.rooms[room.0].kind != kind {
            continue;
        }
        if block_clear(state, taken, &rows, room.0, kind) {
            return Some(room.0);
        }
    }
    None
}

fn find_temporal_shift(
    state: &PlacementState,
    taken: &[TakenAtRow],
    row: usize,
    dur: usize,
    col: usize,
    kind: RoomKind,
) -> Option<usize> {
    let day = row / SLOTS_PER_DAY;
    let slot_in_day = row % SLOTS_PER_DAY;
    for alt_slot in (slot_in_day + 1)..=(slot_in_day + 3).min(SLOTS_PER_DAY - 1) {
        let alt_start = day * SLOTS_PER_DAY + alt_slot;
        if alt_start + dur > (day + 1) * SLOTS_PER_DAY {
            continue;
        }
        let rows: Vec<usize> = (alt_start..alt_start + dur).collect();
        if rows.iter().any(|&r| Slot::from_row(r).is_break()) {
            continue;
        }
        if block_clear(state, taken, &rows, col, kind) {
            return Some(alt_start);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;
    use crate::scheduler::lecture_placer::place_lectures;
    use crate::types::{Config, SubjectConfig, YearConfig};
    use std::collections::BTreeMap;

    fn one_lecture_config(year: Year) -> Config {
        let mut years = BTreeMap::new();
        years.insert(
            year,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Intro".to_string(),
                    hours: 1,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                }],
            },
        );
        let mut batch_map = BTreeMap::new();
        batch_map.insert(year, 1);
        Config {
            num_classrooms: 1,
            num_labs: 0,
            lab_names: None,
            batches: batch_map,
            timings: Default::default(),
            years,
        }
    }

    #[test]
    fn three_years_sharing_one_room_end_up_disjoint() {
        let cfg_sy = one_lecture_config(Year::Sy);
        let cfg_ty = one_lecture_config(Year::Ty);
        let cfg_bt = one_lecture_config(Year::BTech);

        let ds_sy = build_dataset(&cfg_sy, Year::Sy);
        let ds_ty = build_dataset(&cfg_ty, Year::Ty);
        let ds_bt = build_dataset(&cfg_bt, Year::BTech);

        let mut st_sy = PlacementState::new(&ds_sy);
        let mut st_ty = PlacementState::new(&ds_ty);
        let mut st_bt = PlacementState::new(&ds_bt);
        let mut diags = Vec::new();

        // Force all three onto the same preferred cell by placing before
        // reconciliation — identical single-room, single-subject configs
        // will all land on row 0, col 0.
        place_lectures(&ds_sy, &mut st_sy, Year::Sy, &mut diags);
        place_lectures(&ds_ty, &mut st_ty, Year::Ty, &mut diags);
        place_lectures(&ds_bt, &mut st_bt, Year::BTech, &mut diags);

        let mut entries = vec![
            YearEntry { year: Year::Sy, dataset: &ds_sy, state: &mut st_sy },
            YearEntry { year: Year::Ty, dataset: &ds_ty, state: &mut st_ty },
            YearEntry { year: Year::BTech, dataset: &ds_bt, state: &mut st_bt },
        ];
        let conflicts = reconcile(&mut entries);

        let rows: Vec<usize> = entries
            .iter()
            .map(|e| e.state.filled.values().next().unwrap()[0].0)
            .collect();
        assert_eq!(rows.len(), 3);
        assert_ne!(rows[0], rows[1]);
        assert_ne!(rows[1], rows[2]);
        assert!(conflicts.is_empty());
    }
}

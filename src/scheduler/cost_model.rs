use crate::types::{ClassId, Dataset, PlacementState, TeacherId, TOTAL_ROWS};
use std::collections::HashMap;

/// The four additive hard-constraint terms plus a per-class breakdown used
/// to rank mutation candidates in the evolutionary repair loop.
#[derive(Debug, Clone, Default)]
pub struct HardCost {
    pub total: f64,
    pub per_class: HashMap<ClassId, f64>,
    pub teachers_cost: f64,
    pub groups_cost: f64,
    pub classrooms_cost: f64,
}

impl HardCost {
    fn bump(&mut self, class: ClassId, amount: f64) {
        self.total += amount;
        *self.per_class.entry(class).or_insert(0.0) += amount;
    }
}

/// Evaluates hard-constraint cost over the whole matrix: teacher clashes,
/// group clashes, and duration-continuity breakage, each attributed back
/// to the offending classes.
pub fn hard_constraints_cost(dataset: &Dataset, state: &PlacementState) -> HardCost {
    let mut cost = HardCost::default();

    for row in 0..TOTAL_ROWS {
        let occupants: Vec<(usize, ClassId)> = state.matrix.occupied_in_row(row).collect();
        for i in 0..occupants.len() {
            for j in (i + 1)..occupants.len() {
                let (_, a) = occupants[i];
                let (_, b) = occupants[j];
                if a == b {
                    continue;
                }
                let ca = dataset.class(a);
                let cb = dataset.class(b);
                if ca.teacher == cb.teacher {
                    cost.teachers_cost += 1.0;
                    cost.bump(a, 1.0);
                    cost.bump(b, 1.0);
                }
                if ca.shares_group(cb) {
                    cost.groups_cost += 1.0;
                    cost.bump(a, 1.0);
                    cost.bump(b, 1.0);
                }
            }
        }
    }

    for (&class_id, cells) in &state.filled {
        let class = dataset.class(class_id);
        if !duration_is_contiguous(cells, class.duration) {
            cost.classrooms_cost += 1.0;
            cost.bump(class_id, 1.0);
        }
    }

    cost
}

/// True iff `cells` are `duration` consecutive rows, all in the same
/// column, never crossing a day boundary.
fn duration_is_contiguous(cells: &[(usize, usize)], duration: usize) -> bool {
    if cells.len() != duration {
        return false;
    }
    let col = cells[0].1;
    if !cells.iter().all(|&(_, c)| c == col) {
        return false;
    }
    let mut rows: Vec<usize> = cells.iter().map(|&(r, _)| r).collect();
    rows.sort_unstable();
    let day = rows[0] / crate::types::SLOTS_PER_DAY;
    rows.windows(2).all(|w| w[1] == w[0] + 1) && rows.last().map(|&r| r / crate::types::SLOTS_PER_DAY == day).unwrap_or(false)
}

/// 0 iff the matrix is fully feasible.
pub fn check_hard_constraints(dataset: &Dataset, state: &PlacementState) -> f64 {
    hard_constraints_cost(dataset, state).total
}

/// For each group, sums the idle slots strictly between its first and last
/// occupied slot within each day, normalised by the number of groups.
pub fn empty_space_groups_cost(dataset: &Dataset, state: &PlacementState) -> f64 {
    let total: usize = dataset
        .groups
        .iter()
        .map(|g| idle_slots(state.groups_empty.get(&g.id).map(|v| v.as_slice()).unwrap_or(&[])))
        .sum();
    if dataset.groups.is_empty() {
        0.0
    } else {
        total as f64 / dataset.groups.len() as f64
    }
}

/// Same computation, per teacher.
pub fn empty_space_teachers_cost(dataset: &Dataset, state: &PlacementState) -> f64 {
    let total: usize = dataset
        .teachers
        .iter()
        .map(|t| idle_slots(state.teachers_empty.get(&t.id).map(|v| v.as_slice()).unwrap_or(&[])))
        .sum();
    if dataset.teachers.is_empty() {
        0.0
    } else {
        total as f64 / dataset.teachers.len() as f64
    }
}

fn idle_slots(rows: &[usize]) -> usize {
    use crate::types::SLOTS_PER_DAY;
    let mut by_day: HashMap<usize, Vec<usize>> = HashMap::new();
    for &row in rows {
        by_day.entry(row / SLOTS_PER_DAY).or_default().push(row % SLOTS_PER_DAY);
    }
    let mut idle = 0usize;
    for slots in by_day.values_mut() {
        slots.sort_unstable();
        if let (Some(&first), Some(&last)) = (slots.first(), slots.last()) {
            let span = last - first + 1;
            idle += span.saturating_sub(slots.len());
        }
    }
    idle
}

/// Returns `-1` iff no row in the week is entirely empty across all rooms;
/// otherwise the first such row.
pub fn free_hour(state: &PlacementState) -> i64 {
    for row in 0..TOTAL_ROWS {
        if state.matrix.row(row).iter().all(|c| c.is_none()) {
            return row as i64;
        }
    }
    -1
}

/// Unused directly but kept for symmetry with `free_hour`'s matrix-only
/// signature when a caller only has teacher ids on hand.
pub fn teacher_is_idle_at(state: &PlacementState, teacher: &TeacherId, row: usize) -> bool {
    !state
        .teachers_empty
        .get(teacher)
        .map(|rows| rows.contains(&row))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;
    use crate::scheduler::lecture_placer::place_lectures;
    use crate::types::{Config, SubjectConfig, Year, YearConfig};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn single_subject(hours: i64, batches: i64) -> Config {
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Chem".to_string(),
                    hours,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                }],
            },
        );
        let mut batch_map = BTreeMap::new();
        batch_map.insert(Year::Sy, batches);
        Config {
            num_classrooms: 3,
            num_labs: 0,
            lab_names: None,
            batches: batch_map,
            timings: Default::default(),
            years,
        }
    }

    #[test]
    fn feasible_matrix_has_zero_hard_cost() {
        let cfg = single_subject(2, 1);
        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_lectures(&ds, &mut state, Year::Sy, &mut diags);
        assert_eq!(check_hard_constraints(&ds, &state), 0.0);
    }

    #[test]
    fn free_hour_is_negative_one_when_everything_occupied() {
        // no classes placed -> everything empty -> row 0 is a free hour.
        let cfg = single_subject(0, 0);
        let ds = build_dataset(&cfg, Year::Sy);
        let state = PlacementState::new(&ds);
        assert_eq!(free_hour(&state), 0);
    }

    proptest::proptest! {
        /// `HardCost::total` is always the sum of its named terms, doubled
        /// for the pairwise clash terms since `bump` fires once per class
        /// in the colliding pair: a round-trip between the aggregate and
        /// its breakdown that must hold for every reachable matrix, not
        /// just a feasible one.
        #[test]
        fn total_cost_is_consistent_with_its_breakdown(hours in 1i64..4, batches in 1i64..4, seed in 0u64..500) {
            use crate::scheduler::evolutionary::repair;
            use rand::SeedableRng;

            let cfg = single_subject(hours, batches);
            let ds = build_dataset(&cfg, Year::Sy);
            let mut state = PlacementState::new(&ds);
            let mut diags = Vec::new();
            place_lectures(&ds, &mut state, Year::Sy, &mut diags);

            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            repair(&ds, &mut state, &mut rng);

            let cost = hard_constraints_cost(&ds, &state);
            prop_assert_eq!(
                cost.total,
                2.0 * cost.teachers_cost + 2.0 * cost.groups_cost + cost.classrooms_cost
            );
        }
    }
}

use crate::scheduler::cost_model::{empty_space_groups_cost, free_hour};
use crate::scheduler::evolutionary::mutate_ideal_spot;
use crate::types::{ClassId, Dataset, PlacementState};
use rand::Rng;

const ITERATIONS: usize = 2500;
const INITIAL_TEMPERATURE: f64 = 0.5;
const COOLING_RATE: f64 = 0.99;

/// Simulated-annealing pass minimizing soft costs once the matrix is
/// already feasible. Each step snapshots the whole state, mutates one
/// placed class, and accepts the result under the Metropolis criterion;
/// rejected moves restore the snapshot.
pub fn harden(dataset: &Dataset, state: &mut PlacementState, rng: &mut impl Rng) {
    let mut t = INITIAL_TEMPERATURE;
    let pick_count = dataset.classes.len() / 4;

    for _ in 0..ITERATIONS {
        let curr_cost = soft_cost(dataset, state);
        let snapshot = state.clone();

        if pick_count > 0 {
            if let Some(last) = pick_last_of_n(state, pick_count, rng) {
                mutate_ideal_spot(dataset, state, last);
            }
        }

        let new_cost = soft_cost(dataset, state);
        let accept = new_cost < curr_cost
            || rng.gen::<f64>() <= ((curr_cost - new_cost) / t).exp();

        if !accept {
            *state = snapshot;
        }

        t *= COOLING_RATE;
    }
}

/// Picks `n` random placed classes (with replacement, matching the
/// original draw) and returns only the last one picked — see DESIGN.md
/// Open Question 3 for why the other `n - 1` picks are discarded.
fn pick_last_of_n(state: &PlacementState, n: usize, rng: &mut impl Rng) -> Option<ClassId> {
    let placed: Vec<ClassId> = state.filled.keys().copied().collect();
    if placed.is_empty() {
        return None;
    }
    let mut last = None;
    for _ in 0..n {
        last = Some(placed[rng.gen_range(0..placed.len())]);
    }
    last
}

fn soft_cost(dataset: &Dataset, state: &PlacementState) -> f64 {
    let base = empty_space_groups_cost(dataset, state);
    if free_hour(state) == -1 {
        base + 1.0
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;
    use crate::scheduler::lecture_placer::place_lectures;
    use crate::types::{Config, SubjectConfig, Year, YearConfig};
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn config(hours: i64, batches: i64, rooms: i64) -> Config {
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Hist".to_string(),
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
            num_classrooms: rooms,
            num_labs: 0,
            lab_names: None,
            batches: batch_map,
            timings: Default::default(),
            years,
        }
    }

    #[test]
    fn hardening_never_breaks_feasibility() {
        let cfg = config(4, 1, 3);
        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_lectures(&ds, &mut state, Year::Sy, &mut diags);

        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        harden(&ds, &mut state, &mut rng);

        assert_eq!(
            crate::scheduler::cost_model::check_hard_constraints(&ds, &state),
            0.0
        );
    }

    #[test]
    fn hardening_on_spacious_input_leaves_a_free_hour() {
        let cfg = config(1, 1, 4);
        let ds = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&ds);
        let mut diags = Vec::new();
        place_lectures(&ds, &mut state, Year::Sy, &mut diags);

        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        harden(&ds, &mut state, &mut rng);

        assert!(free_hour(&state) >= 0);
    }
}

use crate::scheduler::common::{block_cells, valid_teacher_group_row};
use crate::scheduler::cost_model::hard_constraints_cost;
use crate::types::{ClassId, Dataset, PlacementState};
use rand::Rng;

const POPULATION: usize = 3;
const RUN_TIMES: usize = 5;
const MAX_STAGNATION: usize = 200;

/// Scans `FreeSet` for the first start-cell where `class` could legally
/// sit, unplaces it from its current cells, and places it there. A no-op
/// if no legal spot exists. Returns whether a move happened.
pub fn mutate_ideal_spot(dataset: &Dataset, state: &mut PlacementState, class_id: ClassId) -> bool {
    let class = dataset.class(class_id).clone();
    let mut candidates: Vec<(usize, usize)> = state.free.iter().copied().collect();
    candidates.sort_unstable();

    for (row, col) in candidates {
        if !class.allowed_rooms.iter().any(|r| r.0 == col) {
            continue;
        }
        if !crate::types::same_day_block(row, class.duration) {
            continue;
        }
        let cells = block_cells(row, col, class.duration);
        if cells.iter().any(|&(r, c)| !state.free.contains(&(r, c))) {
            continue;
        }
        if !cells
            .iter()
            .all(|&(r, _)| valid_teacher_group_row(dataset, state, &class, r))
        {
            continue;
        }
        state.unplace(dataset, class_id);
        state.place(dataset, class_id, cells);
        return true;
    }
    false
}

/// Mutates high-cost classes toward zero-cost placements until the matrix
/// is feasible or the run stagnates, across `RUN_TIMES` runs with an
/// adaptive mutation probability `sigma`. Matches the literal behavior of
/// allowing `sigma` to exceed 1.0 (see DESIGN.md Open Question 2): once it
/// does, every top-quartile candidate mutates unconditionally.
pub fn repair(dataset: &Dataset, state: &mut PlacementState, rng: &mut impl Rng) {
    let mut sigma: f64 = 2.0;

    for _run in 0..RUN_TIMES {
        let mut stagnation = 0usize;
        let mut cost_stats = 0usize;
        let mut prev_cost = hard_constraints_cost(dataset, state).total;
        let mut iteration = 0usize;

        loop {
            if prev_cost == 0.0 {
                break;
            }

            let cost = hard_constraints_cost(dataset, state);
            let mut ranked: Vec<(ClassId, f64)> = dataset
                .classes
                .iter()
                .map(|c| (c.id, cost.per_class.get(&c.id).copied().unwrap_or(0.0)))
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
            let quartile = ranked.len() / 4;

            for &(class_id, class_cost) in ranked.iter().take(quartile) {
                if class_cost <= 0.0 {
                    continue;
                }
                if rng.gen::<f64>() < sigma {
                    mutate_ideal_spot(dataset, state, class_id);
                }
            }

            let new_cost = hard_constraints_cost(dataset, state).total;
            if new_cost < prev_cost {
                stagnation = 0;
                cost_stats += 1;
            } else {
                stagnation += 1;
            }
            prev_cost = new_cost;
            iteration += 1;

            if iteration % POPULATION == 0 && iteration > 10 * POPULATION {
                if cost_stats < 2 * POPULATION {
                    sigma *= 0.85;
                } else {
                    sigma /= 0.85;
                }
                cost_stats = 0;
            }

            if stagnation >= MAX_STAGNATION {
                break;
            }
        }
    }
}

mod auditor;

pub use auditor::*;

use crate::error::Diagnostic;
use crate::scheduler::cost_model::{
    check_hard_constraints, empty_space_groups_cost, empty_space_teachers_cost, free_hour,
};
use crate::types::{Dataset, PlacementState, Year};

/// Summarizes one year's final state: is it feasible, what does it cost,
/// and what diagnostics accumulated along the way.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub year: Year,
    pub is_feasible: bool,
    pub hard_cost: f64,
    pub empty_space_groups: f64,
    pub empty_space_teachers: f64,
    pub has_free_hour: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a `ValidationReport` for one year by re-running the cost model
/// and the auditor over its final `Dataset`/`PlacementState`. Independent
/// of whatever diagnostics the pipeline already collected while building
/// that state — this is a standalone check a caller can run later against
/// a previously generated matrix.
pub fn validate(dataset: &Dataset, state: &PlacementState, year: Year) -> ValidationReport {
    let hard_cost = check_hard_constraints(dataset, state);
    let mut diagnostics = audit(dataset, state, year);
    diagnostics.sort_by_key(|d| format!("{d}"));

    ValidationReport {
        year,
        is_feasible: hard_cost == 0.0,
        hard_cost,
        empty_space_groups: empty_space_groups_cost(dataset, state),
        empty_space_teachers: empty_space_teachers_cost(dataset, state),
        has_free_hour: free_hour(state) != -1,
        diagnostics,
    }
}

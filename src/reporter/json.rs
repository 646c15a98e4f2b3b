use crate::error::Result;
use crate::types::{ClassId, Dataset, PlacementState, Year, TOTAL_ROWS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The matrix in the layout external collaborators are expected to
/// persist: a `(60, num_rooms)` array-of-arrays, `null` for an empty cell
/// and the class index otherwise.
#[derive(Serialize, Deserialize)]
pub struct MatrixJson(Vec<Vec<Option<usize>>>);

pub fn matrix_to_json(state: &PlacementState) -> MatrixJson {
    let cols = state.matrix.cols();
    let rows = (0..TOTAL_ROWS)
        .map(|r| {
            (0..cols)
                .map(|c| state.matrix.get(r, c).map(|ClassId(idx)| idx))
                .collect()
        })
        .collect();
    MatrixJson(rows)
}

/// Full on-disk shape of one year's generated matrix: enough to rebuild a
/// `PlacementState` for a later `validate` run without re-running the
/// pipeline.
#[derive(Serialize, Deserialize)]
pub struct ReportFile {
    pub year: Year,
    pub dataset: Dataset,
    pub matrix: MatrixJson,
}

pub fn generate_json_report(year: Year, dataset: &Dataset, state: &PlacementState) -> Result<String> {
    let report = ReportFile {
        year,
        dataset: dataset.clone(),
        matrix: matrix_to_json(state),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Rebuilds a `PlacementState` from a previously persisted matrix by
/// replaying each class's cells through `PlacementState::place`, so every
/// bookkeeping index (`FreeSet`, `GroupsEmpty`, ...) ends up consistent
/// rather than just the raw grid.
pub fn state_from_matrix_json(dataset: &Dataset, matrix: &MatrixJson) -> PlacementState {
    let mut state = PlacementState::new(dataset);
    for class in &dataset.classes {
        let cells: Vec<(usize, usize)> = matrix
            .0
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| {
                cols.iter()
                    .enumerate()
                    .filter(move |(_, cell)| **cell == Some(class.id.0))
                    .map(move |(col, _)| (row, col))
            })
            .collect();
        if !cells.is_empty() {
            state.place(dataset, class.id, cells);
        }
    }
    state
}

/// Loads a `ReportFile` written by `generate_json_report` and rebuilds its
/// `PlacementState`.
pub fn load_report(path: &Path) -> Result<(Year, Dataset, PlacementState)> {
    let content = fs::read_to_string(path)?;
    let report: ReportFile = serde_json::from_str(&content)?;
    let state = state_from_matrix_json(&report.dataset, &report.matrix);
    Ok((report.year, report.dataset, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;
    use crate::scheduler::lecture_placer::place_lectures;
    use crate::types::{Config, SubjectConfig, Year, YearConfig};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn matrix_json_has_the_fixed_row_count() {
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Algebra".to_string(),
                    hours: 1,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                }],
            },
        );
        let mut batches = BTreeMap::new();
        batches.insert(Year::Sy, 1);
        let cfg = Config {
            num_classrooms: 1,
            num_labs: 0,
            lab_names: None,
            batches,
            timings: Default::default(),
            years,
        };
        let dataset = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&dataset);
        let mut diags = Vec::new();
        place_lectures(&dataset, &mut state, Year::Sy, &mut diags);

        let json = matrix_to_json(&state);
        assert_eq!(json.0.len(), TOTAL_ROWS);
        assert!(json.0[0].iter().any(|c| c.is_some()));
    }

    #[test]
    fn state_round_trips_through_matrix_json() {
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Algebra".to_string(),
                    hours: 1,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                }],
            },
        );
        let mut batches = BTreeMap::new();
        batches.insert(Year::Sy, 1);
        let cfg = Config {
            num_classrooms: 1,
            num_labs: 0,
            lab_names: None,
            batches,
            timings: Default::default(),
            years,
        };
        let dataset = build_dataset(&cfg, Year::Sy);
        let mut state = PlacementState::new(&dataset);
        let mut diags = Vec::new();
        place_lectures(&dataset, &mut state, Year::Sy, &mut diags);

        let json = matrix_to_json(&state);
        let rebuilt = state_from_matrix_json(&dataset, &json);
        assert_eq!(rebuilt.filled.len(), state.filled.len());
        for (id, cells) in &state.filled {
            assert_eq!(rebuilt.filled.get(id).map(|c| c.len()), Some(cells.len()));
        }
    }

    proptest::proptest! {
        /// `state_from_matrix_json(matrix_to_json(state))` recovers the same
        /// `filled` cells for every placement reachable from a lecture-only
        /// run, for any batch/room/hour combination within these bounds.
        #[test]
        fn matrix_json_round_trips_for_any_lecture_run(
            hours in 1i64..4,
            batches in 1i64..4,
            rooms in 1i64..3,
        ) {
            let mut years = BTreeMap::new();
            years.insert(
                Year::Sy,
                YearConfig {
                    semester: None,
                    subjects: vec![SubjectConfig {
                        name: "Algebra".to_string(),
                        hours,
                        labs: 0,
                        lab_name: None,
                        lab_hours: 0,
                    }],
                },
            );
            let mut batch_map = BTreeMap::new();
            batch_map.insert(Year::Sy, batches);
            let cfg = Config {
                num_classrooms: rooms,
                num_labs: 0,
                lab_names: None,
                batches: batch_map,
                timings: Default::default(),
                years,
            };
            let dataset = build_dataset(&cfg, Year::Sy);
            let mut state = PlacementState::new(&dataset);
            let mut diags = Vec::new();
            place_lectures(&dataset, &mut state, Year::Sy, &mut diags);

            let json = matrix_to_json(&state);
            let rebuilt = state_from_matrix_json(&dataset, &json);
            prop_assert_eq!(rebuilt.filled.len(), state.filled.len());
            for (id, cells) in &state.filled {
                let mut expected = cells.clone();
                let mut got = rebuilt.filled.get(id).cloned().unwrap_or_default();
                expected.sort_unstable();
                got.sort_unstable();
                prop_assert_eq!(got, expected);
            }
        }
    }
}

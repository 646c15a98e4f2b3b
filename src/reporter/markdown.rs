use crate::types::{Dataset, PlacementState, Slot, DAYS_PER_WEEK, SLOTS_PER_DAY};
use crate::validator::ValidationReport;
use itertools::Itertools;

/// Markdown rendering of one year's final matrix and validation report —
/// a table per day, plus a diagnostics list.
pub fn generate_markdown_report(dataset: &Dataset, state: &PlacementState, report: &ValidationReport) -> String {
    let mut lines = vec![
        format!("# Timetable — {}", report.year),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        "| Metric | Value |".to_string(),
        "|--------|-------|".to_string(),
        format!("| Feasible | {} |", report.is_feasible),
        format!("| Hard cost | {:.1} |", report.hard_cost),
        format!("| Idle slots (groups) | {:.2} |", report.empty_space_groups),
        format!("| Idle slots (teachers) | {:.2} |", report.empty_space_teachers),
        format!("| Guaranteed free hour | {} |", report.has_free_hour),
        String::new(),
    ];

    let cols = state.matrix.cols();
    lines.push("## Grid".to_string());
    lines.push(String::new());

    for day in 0..DAYS_PER_WEEK {
        let day_name = Slot::from_row(day * SLOTS_PER_DAY).day_name();
        lines.push(format!("### {day_name}\n"));

        let header = (0..cols).map(|c| format!("Room {c}")).join(" | ");
        lines.push(format!("| Slot | {header} |"));
        lines.push(format!("|------|{}|", "------|".repeat(cols)));

        for slot in 0..SLOTS_PER_DAY {
            let row = day * SLOTS_PER_DAY + slot;
            let cells = (0..cols)
                .map(|c| match state.matrix.get(row, c) {
                    Some(id) => dataset.class(id).subject.clone(),
                    None => String::new(),
                })
                .join(" | ");
            lines.push(format!("| {} | {cells} |", slot + 1));
        }
        lines.push(String::new());
    }

    if !report.diagnostics.is_empty() {
        lines.push("## Diagnostics\n".to_string());
        for d in &report.diagnostics {
            lines.push(format!("- {d}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::data_builder::build_dataset;
    use crate::scheduler::lecture_placer::place_lectures;
    use crate::types::{Config, SubjectConfig, Year, YearConfig};
    use crate::validator::validate;
    use std::collections::BTreeMap;

    #[test]
    fn report_has_a_heading_per_day() {
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
        let report = validate(&dataset, &state, Year::Sy);

        let md = generate_markdown_report(&dataset, &state, &report);
        assert!(md.contains("### Monday"));
        assert!(md.contains("## Summary"));
    }
}

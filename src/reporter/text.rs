use crate::types::{Dataset, PlacementState, Slot, DAYS_PER_WEEK, SLOTS_PER_DAY};
use crate::validator::ValidationReport;
use colored::Colorize;
use itertools::Itertools;

/// A day/slot grid of the final matrix plus the diagnostics collected
/// while validating it, rendered for terminal output.
pub fn generate_text_report(dataset: &Dataset, state: &PlacementState, report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(60));
    lines.push(format!("  TIMETABLE — {}", report.year));
    lines.push("=".repeat(60));
    lines.push(String::new());

    if report.is_feasible {
        lines.push("feasibility: OK".green().to_string());
    } else {
        lines.push(
            format!("feasibility: FAILED (hard cost {:.1})", report.hard_cost)
                .red()
                .to_string(),
        );
    }
    lines.push(format!("idle slots (groups): {:.2}", report.empty_space_groups));
    lines.push(format!("idle slots (teachers): {:.2}", report.empty_space_teachers));
    lines.push(format!("guaranteed free hour: {}", report.has_free_hour));
    lines.push(String::new());

    for day in 0..DAYS_PER_WEEK {
        let day_name = Slot::from_row(day * SLOTS_PER_DAY).day_name();
        lines.push(format!("-- {day_name} --"));
        for slot in 0..SLOTS_PER_DAY {
            let row = day * SLOTS_PER_DAY + slot;
            let cells = state
                .matrix
                .row(row)
                .iter()
                .map(|cell| match cell {
                    Some(id) => dataset.class(*id).subject.clone(),
                    None => "-".dimmed().to_string(),
                })
                .join(" | ");
            lines.push(format!("  [{slot:>2}] {cells}"));
        }
    }

    lines.push(String::new());
    if report.diagnostics.is_empty() {
        lines.push("diagnostics: none".to_string());
    } else {
        lines.push(format!("diagnostics ({}):", report.diagnostics.len()));
        for d in &report.diagnostics {
            lines.push(format!("  ! {d}"));
        }
    }

    lines.join("\n")
}

/// A one-line summary, for a quick print after a run.
pub fn print_summary(report: &ValidationReport) {
    println!();
    if report.is_feasible {
        println!("{}", format!("{} feasible", report.year).green().bold());
    } else {
        println!("{}", format!("{} NOT feasible", report.year).red().bold());
    }
    println!("  hard cost:   {:.1}", report.hard_cost);
    println!("  free hour:   {}", report.has_free_hour);
    println!("  diagnostics: {}", report.diagnostics.len());
    println!();
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
    fn report_contains_one_line_per_day() {
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

        let text = generate_text_report(&dataset, &state, &report);
        for day in ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"] {
            assert!(text.contains(day));
        }
    }
}

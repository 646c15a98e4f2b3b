mod json;
mod markdown;
mod text;

pub use json::{generate_json_report, load_report, matrix_to_json, state_from_matrix_json, MatrixJson, ReportFile};
pub use markdown::generate_markdown_report;
pub use text::{generate_text_report, print_summary};

use crate::error::Result;
use crate::types::{Dataset, PlacementState};
use crate::validator::ValidationReport;
use std::fs;
use std::path::Path;

/// Output format for a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Writes one year's matrix in every requested format under `output_dir`,
/// named `<year>.<ext>`.
pub fn generate_reports(
    dataset: &Dataset,
    state: &PlacementState,
    report: &ValidationReport,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let year = report.year;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(year, dataset, state)?;
                fs::write(output_dir.join(format!("{year}.json")), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(dataset, state, report);
                fs::write(output_dir.join(format!("{year}.md")), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(dataset, state, report);
                fs::write(output_dir.join(format!("{year}.txt")), txt)?;
            }
        }
    }

    Ok(())
}

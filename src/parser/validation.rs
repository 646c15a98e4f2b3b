use crate::error::Diagnostic;
use crate::types::Config;

/// Structural checks over a freshly parsed `Config`, run before it ever
/// reaches `DataBuilder`. Anything caught here is reported as
/// `Diagnostic::InvalidConfig` rather than failing the parse outright —
/// the core is still free to build a partial schedule from what's left.
pub fn validate_config(config: &Config) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.num_classrooms < 0 {
        diagnostics.push(Diagnostic::InvalidConfig {
            message: format!("num_classrooms is negative ({})", config.num_classrooms),
        });
    }
    if config.num_labs < 0 {
        diagnostics.push(Diagnostic::InvalidConfig {
            message: format!("num_labs is negative ({})", config.num_labs),
        });
    }
    if config.num_classrooms == 0 && config.num_labs == 0 {
        diagnostics.push(Diagnostic::InvalidConfig {
            message: "no classrooms or labs configured".to_string(),
        });
    }

    if let Some(names) = &config.lab_names {
        if !names.is_empty() && names.len() != config.num_labs as usize {
            diagnostics.push(Diagnostic::InvalidConfig {
                message: format!(
                    "lab_names has {} entries but num_labs is {}",
                    names.len(),
                    config.num_labs
                ),
            });
        }
    }

    for (year, &count) in &config.batches {
        if count < 0 {
            diagnostics.push(Diagnostic::InvalidConfig {
                message: format!("batches.{year} is negative ({count})"),
            });
        }
        if count > 0 && !config.years.contains_key(year) {
            diagnostics.push(Diagnostic::InvalidConfig {
                message: format!("batches.{year} is set but [{year}] has no subjects"),
            });
        }
    }

    for (year, year_config) in &config.years {
        for subject in &year_config.subjects {
            if subject.name.trim().is_empty() {
                diagnostics.push(Diagnostic::InvalidConfig {
                    message: format!("{year} has a subject with an empty name"),
                });
            }
            if subject.hours == 0 && subject.labs == 0 {
                diagnostics.push(Diagnostic::InvalidConfig {
                    message: format!(
                        "{year} subject '{}' has zero hours and zero labs",
                        subject.name
                    ),
                });
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SubjectConfig, Year, YearConfig};
    use std::collections::BTreeMap;

    #[test]
    fn flags_batches_with_no_matching_year_block() {
        let mut batches = BTreeMap::new();
        batches.insert(Year::Ty, 2);
        let config = Config {
            num_classrooms: 1,
            num_labs: 0,
            lab_names: None,
            batches,
            timings: Default::default(),
            years: BTreeMap::new(),
        };

        let diagnostics = validate_config(&config);
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::InvalidConfig { .. })));
    }

    #[test]
    fn well_formed_config_has_no_diagnostics() {
        let mut years = BTreeMap::new();
        years.insert(
            Year::Sy,
            YearConfig {
                semester: None,
                subjects: vec![SubjectConfig {
                    name: "Algebra".to_string(),
                    hours: 3,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                }],
            },
        );
        let mut batches = BTreeMap::new();
        batches.insert(Year::Sy, 1);
        let config = Config {
            num_classrooms: 2,
            num_labs: 1,
            lab_names: None,
            batches,
            timings: Default::default(),
            years,
        };

        assert!(validate_config(&config).is_empty());
    }
}

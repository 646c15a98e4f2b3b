use crate::error::{Result, SchedulerError};
use crate::types::Config;
use std::fs;
use std::path::Path;

/// Loads a `Config` from a TOML or JSON file, dispatching on extension.
/// Anything other than a `.toml` extension is parsed as JSON.
pub fn load_config(path: &Path) -> Result<Config> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    if path.extension().and_then(|e| e.to_str()) == Some("toml") {
        toml::from_str(&content).map_err(|e| {
            SchedulerError::ConfigParse {
                file: path_str,
                message: e.to_string(),
            }
            .into()
        })
    } else {
        serde_json::from_str(&content).map_err(|e| {
            SchedulerError::ConfigParse {
                file: path_str,
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Loads a `Config` if `path` exists, otherwise returns the default
/// (empty) configuration. A malformed file still propagates its error —
/// only a missing path falls back silently.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_minimal_toml_config() {
        let path = std::env::temp_dir().join("campus_timetable_engine_test_config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
num_classrooms = 2
num_labs = 1

[batches]
SY = 1

[SY]
[[SY.subjects]]
name = "Algebra"
hours = 3
"#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.num_classrooms, 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = Path::new("/nonexistent/campus_timetable_engine_config.toml");
        let config = load_config_or_default(path).unwrap();
        assert_eq!(config.num_classrooms, 0);
    }
}

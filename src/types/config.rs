use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An academic year sharing the classroom/lab pool with the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "SY")]
    Sy,
    #[serde(rename = "TY")]
    Ty,
    #[serde(rename = "BTech")]
    BTech,
}

impl Year {
    pub fn key(self) -> &'static str {
        match self {
            Year::Sy => "SY",
            Year::Ty => "TY",
            Year::BTech => "BTech",
        }
    }

    /// Fixed reconciliation priority: earlier years are immutable to
    /// later ones. `DataBuilder`/CLI callers may still pass a different
    /// subset or order explicitly; this is only the crate's default.
    pub fn default_priority_order() -> [Year; 3] {
        [Year::Sy, Year::Ty, Year::BTech]
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One subject's weekly demand for a year: `hours` lecture sessions and
/// `labs` lab sessions of `lab_hours` slots each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectConfig {
    pub name: String,
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub labs: i64,
    #[serde(default)]
    pub lab_name: Option<String>,
    #[serde(default)]
    pub lab_hours: i64,
}

/// Per-year subject list plus a free-form label the core never inspects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearConfig {
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
}

/// Day window, informational only: the grid itself is fixed at twelve
/// slot columns regardless of these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingsConfig {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_short_break")]
    pub short_break_min: u32,
    #[serde(default = "default_lunch_break")]
    pub lunch_break_min: u32,
}

fn default_start() -> String {
    "09:00".to_string()
}
fn default_end() -> String {
    "17:00".to_string()
}
fn default_short_break() -> u32 {
    10
}
fn default_lunch_break() -> u32 {
    45
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            short_break_min: default_short_break(),
            lunch_break_min: default_lunch_break(),
        }
    }
}

/// The whole in-memory configuration `DataBuilder` expands into datasets.
/// Raw file parsing into this shape is the CLI's concern (`src/parser`);
/// the core always receives an already-validated value of this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub num_classrooms: i64,
    #[serde(default)]
    pub num_labs: i64,
    #[serde(default)]
    pub lab_names: Option<Vec<String>>,
    #[serde(default)]
    pub batches: BTreeMap<Year, i64>,
    #[serde(default)]
    pub timings: TimingsConfig,
    #[serde(default)]
    pub years: BTreeMap<Year, YearConfig>,
}

impl Config {
    pub fn batch_count(&self, year: Year) -> usize {
        self.batches.get(&year).copied().unwrap_or(0).max(0) as usize
    }

    pub fn year(&self, year: Year) -> YearConfig {
        self.years.get(&year).cloned().unwrap_or_default()
    }
}

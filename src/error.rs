use thiserror::Error;

use crate::types::{ClassId, GroupId, Year};

/// Hard failures at the I/O / configuration boundary. The core pipeline
/// (DataBuilder through CrossYearReconciler) never raises these — it has
/// no exceptional control transfers, per the error handling design; every
/// one of its failure modes is a value-returned `Diagnostic` instead.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{file}': {message}")]
    ConfigParse { file: String, message: String },

    #[error("no configuration found for year '{0}'")]
    UnknownYearKey(String),

    #[error("no matrix found for year '{0}' in validate input")]
    MissingMatrix(String),
}

/// Use anyhow::Result at application boundaries (CLI, parser, reporter).
pub type Result<T> = anyhow::Result<T>;

/// A value-returned diagnostic. None of these abort the pipeline; they
/// accumulate in a `Vec<Diagnostic>` that every core entry point returns
/// alongside its matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Lecture or lab demand exceeds `rooms * days * slots` for a year.
    CapacityWarning { year: Year, message: String },
    /// Phase A or B exhausted retries without placing `class`.
    UnplacedClass { year: Year, class: ClassId, subject: String },
    /// Scheduled count fell short of required for `(subject, group)`.
    QuotaShortfall {
        year: Year,
        subject: String,
        group: GroupId,
        required: usize,
        scheduled: usize,
    },
    /// A per-group weekly capacity bound was exceeded.
    CapacityExceeded { year: Year, group: GroupId, required: usize, limit: usize },
    /// The reconciler could not relocate a clashing block.
    CrossYearConflict { year: Year, row: usize, message: String },
    /// A numeric config field coerced to zero/empty rather than being
    /// rejected outright.
    InvalidConfig { message: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::CapacityWarning { year, message } => {
                write!(f, "[{year}] capacity warning: {message}")
            }
            Diagnostic::UnplacedClass { year, class, subject } => {
                write!(f, "[{year}] could not place {class} ({subject})")
            }
            Diagnostic::QuotaShortfall {
                year,
                subject,
                group,
                required,
                scheduled,
            } => write!(
                f,
                "[{year}] {group}: {subject} scheduled {scheduled}/{required} sessions"
            ),
            Diagnostic::CapacityExceeded {
                year,
                group,
                required,
                limit,
            } => write!(
                f,
                "[{year}] {group}: weekly capacity exceeded ({required} > {limit})"
            ),
            Diagnostic::CrossYearConflict { year, row, message } => {
                write!(f, "[{year}] row {row}: {message}")
            }
            Diagnostic::InvalidConfig { message } => write!(f, "invalid config: {message}"),
        }
    }
}

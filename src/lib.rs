//! Campus Timetable Engine - constraint-based multi-year timetable construction
//!
//! This library builds a weekly class timetable for several academic years
//! sharing a common pool of lecture rooms and labs.
//!
//! # Algorithm Overview
//!
//! Each year runs through the same pipeline:
//! 1. **Data Builder**: expand subject quotas into concrete classes, teachers, and rooms
//! 2. **Lab Placer**: seat lab sessions in the two canonical double-slot windows
//! 3. **Lecture Placer**: seat remaining lecture hours, preferring early slots
//! 4. **Evolutionary Repair**: mutate infeasible placements until hard costs reach zero
//! 5. **Simulated Hardening**: anneal the feasible matrix toward fewer idle slots
//!
//! Once every year is built, the **Cross-Year Reconciler** relocates any
//! room double-booked by more than one year's matrix, and the **Auditor**
//! flags subjects that fell short of their weekly quota.
//!
//! # Example
//!
//! ```no_run
//! use campus_timetable_engine::parser::load_config;
//! use campus_timetable_engine::scheduler::generate_timetables;
//! use campus_timetable_engine::types::Year;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("./config.toml")).unwrap();
//! let years = [Year::Sy, Year::Ty, Year::BTech];
//! let (schedules, diagnostics, elapsed) = generate_timetables(&config, &years, 42, true);
//! println!("built {} year(s) in {:?}, {} diagnostics", schedules.len(), elapsed, diagnostics.len());
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};

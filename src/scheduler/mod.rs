pub mod common;
pub mod cost_model;
pub mod data_builder;
pub mod evolutionary;
pub mod hardening;
pub mod lab_placer;
pub mod lecture_placer;
pub mod reconciler;

use crate::error::Diagnostic;
use crate::types::{ClassKind, Config, Dataset, PlacementState, RoomKind, Year, TOTAL_ROWS};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reconciler::YearEntry;
use std::time::Instant;

fn capacity_diagnostics(dataset: &Dataset, year: Year) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for kind in [ClassKind::Lecture, ClassKind::Lab] {
        let demand: usize = dataset
            .classes
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.duration)
            .sum();
        let room_kind = match kind {
            ClassKind::Lecture => RoomKind::Lecture,
            ClassKind::Lab => RoomKind::Lab,
        };
        let room_count = dataset.rooms.iter().filter(|r| r.kind == room_kind).count();
        let supply = TOTAL_ROWS * room_count;
        if demand > supply {
            diagnostics.push(Diagnostic::CapacityWarning {
                year,
                message: format!("{kind:?} demand ({demand} slots) exceeds supply ({supply} slots)"),
            });
        }
    }
    diagnostics
}

fn make_progress(quiet: bool, len: u64) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }
}

/// One year's finished construction: its dataset, final placement state,
/// and every diagnostic collected while building it.
pub struct YearSchedule {
    pub year: Year,
    pub dataset: Dataset,
    pub state: PlacementState,
}

/// Runs the full pipeline — DataBuilder, Lab Placer, Lecture Placer,
/// Evolutionary Repair, Simulated Hardening — for every year in `years`,
/// then reconciles cross-year room conflicts. `seed` makes the run
/// reproducible; the evolutionary and hardening phases never read a
/// process-global RNG.
pub fn generate_timetables(
    config: &Config,
    years: &[Year],
    seed: u64,
    quiet: bool,
) -> (Vec<YearSchedule>, Vec<Diagnostic>, std::time::Duration) {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let progress = make_progress(quiet, years.len() as u64 * 4 + 1);
    let mut diagnostics = Vec::new();
    let mut results = Vec::new();

    for &year in years {
        progress.set_message(format!("{year}: building dataset"));
        let dataset = data_builder::build_dataset(config, year);
        diagnostics.extend(capacity_diagnostics(&dataset, year));
        let mut state = PlacementState::new(&dataset);
        progress.inc(1);

        progress.set_message(format!("{year}: placing labs"));
        lab_placer::place_labs(&dataset, &mut state, year, &mut diagnostics);
        progress.inc(1);

        progress.set_message(format!("{year}: placing lectures"));
        lecture_placer::place_lectures(&dataset, &mut state, year, &mut diagnostics);
        progress.inc(1);

        progress.set_message(format!("{year}: repairing and hardening"));
        evolutionary::repair(&dataset, &mut state, &mut rng);
        hardening::harden(&dataset, &mut state, &mut rng);
        diagnostics.extend(crate::validator::audit(&dataset, &state, year));
        progress.inc(1);

        results.push(YearSchedule { year, dataset, state });
    }

    progress.set_message("reconciling cross-year room conflicts");
    {
        let mut entries: Vec<YearEntry> = results
            .iter_mut()
            .map(|y| YearEntry {
                year: y.year,
                dataset: &y.dataset,
                state: &mut y.state,
            })
            .collect();
        diagnostics.extend(reconciler::reconcile(&mut entries));
    }
    progress.inc(1);
    progress.finish_with_message("done");

    (results, diagnostics, start.elapsed())
}

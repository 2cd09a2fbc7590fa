//! The generate → write → read → sort → write run.
//!
//! A failing file step is reported and the steps that depend on it are skipped;
//! nothing is retried.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::*;
use crate::numbers;
use crate::sched::ScheduleSystem;
use crate::settings::{SchedParams, Settings};
use crate::sort;
use crate::utils::Timestamp;

/// What a run did.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Number of generated integers.
    pub generated: usize,
    /// Number of integers read back and sorted; `None` if reading failed.
    pub sorted: Option<usize>,
    /// Whether the sorted integers reached the output file.
    pub written: bool,
    /// Wall-clock time up to the last write.
    pub elapsed: Duration,
}

/// Creates the scheduler described by `params`.
pub fn scheduler(params: &SchedParams) -> Result<ScheduleSystem> {
    if params.workers == 0 {
        return Ok(ScheduleSystem::headless());
    }

    ScheduleSystem::new(params.workers, params.stack_size).map_err(Error::Scheduler)
}

/// Runs the whole pipeline with a scheduler built from `settings`. The reported
/// time includes starting the workers.
pub fn run(settings: &Settings) -> Result<Report> {
    let ts = Timestamp::now();
    let sched = scheduler(&settings.sched)?;
    Ok(execute(settings, &sched, ts))
}

/// Runs the whole pipeline, sorting on `sched`.
pub fn run_with(settings: &Settings, sched: &ScheduleSystem) -> Report {
    execute(settings, sched, Timestamp::now())
}

fn execute(settings: &Settings, sched: &ScheduleSystem, ts: Timestamp) -> Report {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let numbers = numbers::generate(settings.count, &mut rng);
    if let Err(err) = numbers::write(&settings.input, &numbers) {
        error!("[Pipeline] {}", err);
    }

    let generated = numbers.len();
    let mut sorted = None;
    let mut written = false;

    match numbers::read(&settings.input) {
        Ok(mut numbers) => {
            sorted = Some(numbers.len());

            if !numbers.is_empty() {
                sort::sort_in(sched, &mut numbers);

                match numbers::write(&settings.output, &numbers) {
                    Ok(()) => written = true,
                    Err(err) => error!("[Pipeline] {}", err),
                }
            }
        }
        Err(err) => {
            error!("[Pipeline] {}", err);
        }
    }

    Report {
        generated,
        sorted,
        written,
        elapsed: ts.elapsed(),
    }
}

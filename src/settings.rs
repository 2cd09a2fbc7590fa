//! Functions for loading run settings.

use std::path::PathBuf;

/// A structure containing configuration data for a generate-and-sort run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Number of random integers to generate.
    pub count: usize,
    /// File that receives the generated integers.
    pub input: PathBuf,
    /// File that receives the sorted integers.
    pub output: PathBuf,
    pub sched: SchedParams,
    /// Seeds the generator. Seeded from entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            count: 100,
            input: PathBuf::from("input_numbers.csv"),
            output: PathBuf::from("sorted_numbers.csv"),
            sched: SchedParams::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedParams {
    /// Number of worker threads; zero sorts on the calling thread.
    pub workers: u32,
    /// Stack size of worker threads, in bytes.
    pub stack_size: Option<usize>,
}

impl Default for SchedParams {
    fn default() -> Self {
        SchedParams {
            workers: num_cpus::get() as u32,
            stack_size: None,
        }
    }
}

//! # Parallel Quick Sort
//!
//! Generates integers, persists them as comma-separated text, reads them back,
//! sorts them with a quick sort running on a work-stealing fork-join scheduler,
//! and persists the sorted result.
//!
//! The scheduler lives in `sched`, the sort in `sort`, and the file collaborators
//! in `numbers`. `pipeline` ties them together the way the command-line tool runs
//! them.
//!
//! ```
//! let mut v = vec![5, 3, 8, 1, 9, 2];
//! parallel_quicksort::sort::sort(&mut v);
//! assert_eq!(v, vec![1, 2, 3, 5, 8, 9]);
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod errors;
pub mod numbers;
pub mod pipeline;
pub mod sched;
pub mod settings;
pub mod sort;
pub mod utils;

pub mod prelude;

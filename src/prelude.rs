pub use crate::errors::{Error, Result};
pub use crate::pipeline::Report;
pub use crate::sched::{ScheduleSystem, Scope};
pub use crate::settings::{SchedParams, Settings};
pub use crate::sort::{sort, sort_in};

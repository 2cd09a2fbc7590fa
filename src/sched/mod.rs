//! #### Schedule Subsystem
//! A small work-stealing pool built for fork-join sorting. Every call opens one
//! `Scope` from outside the pool; the scope's jobs spread over per-worker deques
//! and idle workers steal from their siblings. A `Scope` does not return until
//! every job spawned into it, transitively, has completed.
//!
//! #### Thanks
//! The job and latch design follows [rayon](https://github.com/rayon-rs/rayon.git)
//! with [MIT License](https://github.com/rayon-rs/rayon/blob/master/LICENSE-MIT).

pub mod latch;
pub mod scope;

mod job;
mod scheduler;

pub use self::scope::Scope;

use std::io;
use std::sync::Arc;

use self::scheduler::Scheduler;

pub struct ScheduleSystem {
    scheduler: Option<Arc<Scheduler>>,
}

impl ScheduleSystem {
    /// Spawns `num` worker threads. The optional `stack_size` applies to every worker.
    pub fn new(num: u32, stack_size: Option<usize>) -> io::Result<Self> {
        let scheduler = Scheduler::start(num, stack_size)?;
        info!("[ScheduleSystem] Spawns {} worker threads.", num);

        Ok(ScheduleSystem {
            scheduler: Some(scheduler),
        })
    }

    /// Creates a scheduler without any worker thread. Jobs are executed on the
    /// calling thread immediately when spawned.
    pub fn headless() -> Self {
        ScheduleSystem { scheduler: None }
    }

    /// Number of worker threads.
    #[inline]
    pub fn len(&self) -> usize {
        self.scheduler.as_ref().map(|v| v.len()).unwrap_or(0)
    }

    /// Stops the workers once they run out of jobs and joins them. Calling it
    /// again does nothing.
    pub fn terminate(&self) {
        if let Some(ref scheduler) = self.scheduler {
            let num = scheduler.terminate();
            if num > 0 {
                debug!("[ScheduleSystem] Terminated {} worker threads.", num);
            }
        }
    }

    /// Create a "fork-join" scope `s` and invokes the closure with a
    /// reference to `s`. This closure can then spawn asynchronous tasks
    /// into `s`. Those tasks may run asynchronously with respect to the
    /// closure; they may themselves spawn additional tasks into `s`. When
    /// the closure returns, it will block until all tasks that have been
    /// spawned into `s` complete.
    pub fn scope<'s, F, R>(&self, func: F) -> R
    where
        F: for<'r> FnOnce(&'r Scope<'s>) -> R + 's + Send,
        R: Send,
    {
        match self.scheduler {
            Some(ref scheduler) => scheduler.in_worker(|worker| {
                let scope = Scope::new(Some(scheduler.clone()));
                scope.complete(Some(worker), func)
            }),
            None => Scope::new(None).complete(None, func),
        }
    }
}

impl Drop for ScheduleSystem {
    fn drop(&mut self) {
        self.terminate();
    }
}

use std::any::Any;
use std::marker::PhantomData;
use std::panic;
use std::sync::{Arc, Mutex};

use super::job::{self, HeapJob};
use super::latch::{CountLatch, Latch};
use super::scheduler::{Scheduler, WorkerThread};

/// Represents a fork-join scope which can be used to spawn any number of tasks.
pub struct Scope<'s> {
    scheduler: Option<Arc<Scheduler>>,
    /// One for the scope body plus one for every spawned job still to finish.
    pending: CountLatch,
    /// The first panic of the body or of any job, resumed by `complete`.
    panic: Mutex<Option<Box<dyn Any + Send>>>,
    marker: PhantomData<Box<dyn FnOnce(&Scope<'s>) + Send + Sync + 's>>,
}

impl<'s> Scope<'s> {
    pub(crate) fn new(scheduler: Option<Arc<Scheduler>>) -> Self {
        Scope {
            scheduler,
            pending: CountLatch::new(),
            panic: Mutex::new(None),
            marker: PhantomData,
        }
    }

    /// Spawns a job into the fork-join scope `self`. This job will execute sometime before
    /// the fork-join scope completes.  The job is specified as a closure, and this closure
    /// receives its own reference to `self` as argument. This can be used to inject new jobs
    /// into `self`.
    ///
    /// In a headless scope the closure runs immediately on the current thread.
    pub fn spawn<F>(&self, func: F)
    where
        F: FnOnce(&Scope<'s>) + Send + 's,
    {
        match self.scheduler {
            Some(ref scheduler) => {
                self.pending.increment();

                // `complete` does not return before `pending` drops to zero, so
                // `self` and everything `func` borrows outlive the job.
                unsafe {
                    let job = HeapJob::new(move || {
                        self.run_job(func);
                        self.pending.set();
                    });

                    scheduler.push(job.into_job_ref());
                }
            }
            None => {
                self.run_job(func);
            }
        }
    }

    /// Runs the scope body `func`, waits for every job spawned into the scope
    /// and resumes the first panic among them. `worker` keeps executing jobs
    /// while waiting; headless scopes pass `None` as they have nothing left
    /// to wait for.
    pub(crate) fn complete<F, R>(&self, worker: Option<&WorkerThread>, func: F) -> R
    where
        F: FnOnce(&Scope<'s>) -> R,
    {
        let result = self.run_job(func);
        self.pending.set();

        if let Some(worker) = worker {
            worker.wait_until(&self.pending);
        }

        let panic = self.panic.lock().unwrap().take();
        if let Some(payload) = panic {
            panic::resume_unwind(payload);
        }

        match result {
            Some(v) => v,
            None => unreachable!("a panicking scope body was not resumed"),
        }
    }

    fn run_job<F, R>(&self, func: F) -> Option<R>
    where
        F: FnOnce(&Scope<'s>) -> R,
    {
        match job::catch(|| func(self)) {
            Ok(v) => Some(v),
            Err(payload) => {
                let mut slot = self.panic.lock().unwrap();
                if slot.is_none() {
                    *slot = Some(payload);
                }

                None
            }
        }
    }
}

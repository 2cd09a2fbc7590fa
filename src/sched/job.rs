use std::cell::UnsafeCell;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::process;

use super::latch::Latch;

/// Effectively a job trait object: a type-erased pointer to the job's data and
/// the function that runs it. Each JobRef **must** be executed exactly once,
/// or else data may leak.
#[derive(Copy, Clone)]
pub struct JobRef {
    pointer: *const (),
    execute_fn: unsafe fn(*const ()),
}

unsafe impl Send for JobRef {}
unsafe impl Sync for JobRef {}

impl JobRef {
    unsafe fn new<T>(data: *const T, execute_fn: unsafe fn(*const T)) -> JobRef {
        JobRef {
            pointer: data as *const (),
            execute_fn: mem::transmute::<unsafe fn(*const T), unsafe fn(*const ())>(execute_fn),
        }
    }

    #[inline]
    pub unsafe fn execute(self) {
        (self.execute_fn)(self.pointer)
    }
}

/// A job living in the stack frame of a thread outside the pool, which blocks
/// on `latch` until a worker has run it. Carries the closure's result (or its
/// panic) back to that thread.
pub struct StackJob<L, F, R>
where
    L: Latch,
    F: FnOnce() -> R + Send,
{
    pub latch: L,
    func: UnsafeCell<Option<F>>,
    result: UnsafeCell<Option<std::thread::Result<R>>>,
}

impl<L, F, R> StackJob<L, F, R>
where
    L: Latch,
    F: FnOnce() -> R + Send,
{
    pub fn new(func: F, latch: L) -> StackJob<L, F, R> {
        StackJob {
            latch,
            func: UnsafeCell::new(Some(func)),
            result: UnsafeCell::new(None),
        }
    }

    /// The returned reference must not be executed after `self` is gone; the
    /// owner guarantees that by waiting on `latch` first.
    pub unsafe fn as_job_ref(&self) -> JobRef {
        JobRef::new(self, Self::execute)
    }

    /// Returns the closure's value, resuming its panic if it had one.
    pub fn into_result(self) -> R {
        match self.result.into_inner() {
            Some(Ok(v)) => v,
            Some(Err(payload)) => panic::resume_unwind(payload),
            None => unreachable!("stack job was never executed"),
        }
    }

    unsafe fn execute(this: *const Self) {
        let this = &*this;
        let guard = AbortOnUnwind;
        if let Some(func) = (*this.func.get()).take() {
            *this.result.get() = Some(catch(func));
        }
        this.latch.set();
        mem::forget(guard);
    }
}

/// A boxed job. Running it frees the box; whatever bookkeeping the job needs
/// (like signalling its scope) lives in the closure itself.
pub struct HeapJob<BODY>
where
    BODY: FnOnce() + Send,
{
    job: BODY,
}

impl<BODY> HeapJob<BODY>
where
    BODY: FnOnce() + Send,
{
    pub fn new(func: BODY) -> Box<Self> {
        Box::new(HeapJob { job: func })
    }

    /// Hides every lifetime `BODY` borrows; the caller has to keep that data
    /// alive until the job ran.
    pub unsafe fn into_job_ref(self: Box<Self>) -> JobRef {
        JobRef::new(Box::into_raw(self) as *const Self, Self::execute)
    }

    unsafe fn execute(this: *const Self) {
        let this = *Box::from_raw(this as *mut Self);
        (this.job)();
    }
}

/// Runs `func`, turning a panic into an `Err` to be resumed elsewhere.
pub fn catch<F, R>(func: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(func))
}

/// Aborts the process when dropped. Forgotten at the end of sections that
/// must not unwind, such as a worker's main loop.
pub struct AbortOnUnwind;

impl Drop for AbortOnUnwind {
    fn drop(&mut self) {
        eprintln!("unexpected panic in a scheduler worker; aborting");
        process::abort();
    }
}

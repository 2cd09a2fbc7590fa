use std::cell::Cell;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use std::{io, mem, ptr};

use crossbeam_deque::{Injector, Steal, Stealer, Worker};
use rand::Rng;

use super::job::{AbortOnUnwind, JobRef, StackJob};
use super::latch::{Latch, LatchStatus, LatchWait, LockLatch, SpinLatch};

/// Longest nap of an idle worker, in milliseconds, before it looks for jobs again.
const MAX_NAP_MS: u64 = 48;

/// The state shared by the workers of a pool: one deque stealer per worker, the
/// injector that receives jobs from outside the pool, and the shutdown flag.
pub struct Scheduler {
    injector: Injector<JobRef>,
    stealers: Vec<Stealer<JobRef>>,
    idle: Idle,
    shutdown: SpinLatch,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    /// Starts `num` workers, each owning a FIFO deque.
    pub fn start(num: u32, stack_size: Option<usize>) -> io::Result<Arc<Self>> {
        let deques: Vec<Worker<JobRef>> = (0..num).map(|_| Worker::new_fifo()).collect();

        let scheduler = Arc::new(Scheduler {
            injector: Injector::new(),
            stealers: deques.iter().map(Worker::stealer).collect(),
            idle: Idle::default(),
            shutdown: SpinLatch::new(),
            handles: Mutex::new(Vec::with_capacity(deques.len())),
        });

        for (index, deque) in deques.into_iter().enumerate() {
            let mut builder = thread::Builder::new().name(format!("sort-worker-{}", index));
            if let Some(stack_size) = stack_size {
                builder = builder.stack_size(stack_size);
            }

            let shared = scheduler.clone();
            match builder.spawn(move || WorkerThread::run(shared, index, deque)) {
                Ok(handle) => scheduler.handles.lock().unwrap().push(handle),
                Err(err) => {
                    scheduler.terminate();
                    return Err(err);
                }
            }
        }

        Ok(scheduler)
    }

    /// Number of worker threads.
    #[inline]
    pub fn len(&self) -> usize {
        self.stealers.len()
    }

    /// Queues `job`: on the current worker's own deque when called from one of
    /// our workers, on the injector otherwise.
    pub unsafe fn push(&self, job: JobRef) {
        match self.current_worker().as_ref() {
            Some(worker) => worker.deque.push(job),
            None => self.injector.push(job),
        }

        self.idle.wake_one();
    }

    /// Runs `op` on a worker of this pool and blocks until it returns, resuming
    /// its panic if it had one. One of our own workers runs it in place.
    pub fn in_worker<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&WorkerThread) -> R + Send,
        R: Send,
    {
        unsafe {
            if let Some(worker) = self.current_worker().as_ref() {
                return op(worker);
            }

            // Only a worker picks the job up, so `current` is set when it runs.
            let job = StackJob::new(|| op(&*WorkerThread::current()), LockLatch::new());
            self.push(job.as_job_ref());

            job.latch.wait();
            job.into_result()
        }
    }

    /// Asks the workers to exit once they are out of work and joins them.
    /// Returns the number of threads joined, which is zero on repeated calls.
    pub fn terminate(&self) -> usize {
        self.shutdown.set();
        self.idle.wake_all();

        let handles = mem::replace(&mut *self.handles.lock().unwrap(), Vec::new());
        let num = handles.len();
        for handle in handles {
            // Workers never unwind; a panic escaping their loop aborts instead.
            let _ = handle.join();
        }

        num
    }

    /// The worker of this pool running on the current thread, or NULL. Workers
    /// of other pools count as outside threads.
    #[inline]
    fn current_worker(&self) -> *const WorkerThread {
        let worker = WorkerThread::current();
        unsafe {
            match worker.as_ref() {
                Some(v) if ptr::eq(&*v.scheduler, self) => worker,
                _ => ptr::null(),
            }
        }
    }
}

/// Where idle workers and waiting scopes doze off until new jobs show up.
#[derive(Default)]
struct Idle {
    lock: Mutex<()>,
    cvar: Condvar,
}

impl Idle {
    fn nap(&self, ms: u64) {
        let guard = self.lock.lock().unwrap();
        let _ = self.cvar.wait_timeout(guard, Duration::from_millis(ms));
    }

    #[inline]
    fn wake_one(&self) {
        self.cvar.notify_one();
    }

    #[inline]
    fn wake_all(&self) {
        self.cvar.notify_all();
    }
}

pub struct WorkerThread {
    scheduler: Arc<Scheduler>,
    index: usize,
    deque: Worker<JobRef>,
}

// The WorkerThread lives on the stack of its thread for as long as the thread
// runs jobs, so a raw pointer in a thread local stays valid for every job.
thread_local! {
    static CURRENT: Cell<*const WorkerThread> = Cell::new(ptr::null());
}

impl WorkerThread {
    fn run(scheduler: Arc<Scheduler>, index: usize, deque: Worker<JobRef>) {
        let worker = WorkerThread {
            scheduler,
            index,
            deque,
        };

        CURRENT.with(|t| t.set(&worker));
        worker.wait_until(&worker.scheduler.shutdown);
        CURRENT.with(|t| t.set(ptr::null()));
    }

    #[inline]
    fn current() -> *const WorkerThread {
        CURRENT.with(|t| t.get())
    }

    /// Keeps executing jobs until `latch` is set. Looks at the own deque first,
    /// then steals from a sibling, and at last takes from the injector.
    pub fn wait_until<L: LatchStatus>(&self, latch: &L) {
        let guard = AbortOnUnwind;
        let mut nap = 1;

        while !latch.is_set() {
            match self.find_job() {
                Some(job) => {
                    // Every job in our queues was pushed by `Scheduler::push`,
                    // whose callers keep the job's data alive until it ran.
                    unsafe { job.execute() };
                    self.scheduler.idle.wake_all();
                    nap = 1;
                }
                None => {
                    self.scheduler.idle.nap(nap);
                    nap = (nap * 2).min(MAX_NAP_MS);
                }
            }
        }

        mem::forget(guard);
    }

    fn find_job(&self) -> Option<JobRef> {
        self.deque
            .pop()
            .or_else(|| self.steal())
            .or_else(|| settle(|| self.scheduler.injector.steal()))
    }

    /// Tries the siblings once each, starting from a random one.
    fn steal(&self) -> Option<JobRef> {
        let stealers = &self.scheduler.stealers;
        if stealers.len() <= 1 {
            return None;
        }

        let start = rand::thread_rng().gen_range(0..stealers.len());
        (start..stealers.len())
            .chain(0..start)
            .filter(|&i| i != self.index)
            .find_map(|i| settle(|| stealers[i].steal()))
    }
}

/// Retries a steal until it either succeeds or finds the queue empty.
fn settle<F>(steal: F) -> Option<JobRef>
where
    F: Fn() -> Steal<JobRef>,
{
    loop {
        match steal() {
            Steal::Success(job) => return Some(job),
            Steal::Empty => return None,
            Steal::Retry => {}
        }
    }
}

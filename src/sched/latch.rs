use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

/// We define various kinds of latches, which are all a primitive signaling
/// mechanism. A latch starts as false. Eventually someone calls `set()` and
/// it becomes true. You can test if it has been set by calling `is_set()`.
pub trait LatchStatus {
    /// Test if the latch is set.
    fn is_set(&self) -> bool;
}

pub trait Latch: LatchStatus {
    /// Set the latch, signalling others.
    fn set(&self);
}

/// A latch that the current thread could block on until it becomes set.
pub trait LatchWait: LatchStatus {
    /// Block until latch is set.
    fn wait(&self);
}

/// A flag that is polled rather than waited on. Workers check it between
/// jobs to know when the pool shuts down.
#[derive(Debug, Default)]
pub struct SpinLatch {
    b: AtomicBool,
}

impl SpinLatch {
    #[inline]
    pub fn new() -> SpinLatch {
        SpinLatch {
            b: AtomicBool::new(false),
        }
    }
}

impl LatchStatus for SpinLatch {
    #[inline]
    fn is_set(&self) -> bool {
        self.b.load(Ordering::Acquire)
    }
}

impl Latch for SpinLatch {
    #[inline]
    fn set(&self) {
        self.b.store(true, Ordering::Release);
    }
}

/// A Latch starts as false and eventually becomes true. You can block until
/// it becomes true.
#[derive(Debug, Default)]
pub struct LockLatch {
    m: Mutex<bool>,
    v: Condvar,
}

impl LockLatch {
    #[inline]
    pub fn new() -> LockLatch {
        LockLatch {
            m: Mutex::new(false),
            v: Condvar::new(),
        }
    }
}

impl LatchStatus for LockLatch {
    #[inline]
    fn is_set(&self) -> bool {
        // Not particularly efficient, but we don't really use this operation
        let guard = self.m.lock().unwrap();
        *guard
    }
}

impl Latch for LockLatch {
    #[inline]
    fn set(&self) {
        let mut guard = self.m.lock().unwrap();
        *guard = true;
        self.v.notify_all();
    }
}

impl LatchWait for LockLatch {
    fn wait(&self) {
        let mut guard = self.m.lock().unwrap();
        while !*guard {
            guard = self.v.wait(guard).unwrap();
        }
    }
}

/// Counting latches are used to implement scopes. They track a counter. Unlike
/// other latches, calling `set()` does not necessarily make the latch be
/// considered `set()`; instead, it just decrements the counter. The latch is
/// only "set" (in the sense that`is_set()` returns true) once the counter reaches zero.
#[derive(Debug)]
pub struct CountLatch {
    counter: AtomicUsize,
}

impl CountLatch {
    #[inline]
    pub fn new() -> CountLatch {
        CountLatch {
            counter: AtomicUsize::new(1),
        }
    }

    #[inline]
    pub fn increment(&self) {
        debug_assert!(!self.is_set());
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for CountLatch {
    fn default() -> Self {
        CountLatch::new()
    }
}

impl LatchStatus for CountLatch {
    #[inline]
    fn is_set(&self) -> bool {
        // Need to acquire any memory reads before latch was set:
        self.counter.load(Ordering::SeqCst) == 0
    }
}

impl Latch for CountLatch {
    /// Decrements the counter, releasing all threads who are waiting once it reaches zero.
    #[inline]
    fn set(&self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn count_latch() {
        let latch = CountLatch::new();
        assert!(!latch.is_set());

        latch.increment();
        latch.increment();
        latch.set();
        latch.set();
        assert!(!latch.is_set());

        latch.set();
        assert!(latch.is_set());
    }

    #[test]
    fn spin_latch() {
        let latch = SpinLatch::new();
        assert!(!latch.is_set());
        latch.set();
        assert!(latch.is_set());
        latch.set();
        assert!(latch.is_set());
    }

    #[test]
    fn lock_latch() {
        let latch = Arc::new(LockLatch::new());
        assert!(!latch.is_set());

        let handle = {
            let latch = latch.clone();
            thread::spawn(move || latch.set())
        };

        latch.wait();
        assert!(latch.is_set());
        handle.join().unwrap();
    }
}

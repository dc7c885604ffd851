//! Counting semaphore

use parking_lot::{Condvar, Mutex};

/// Counting signal: `post` adds permits, `wait` blocks until one is available.
///
/// There is no timeout; an owner that wants its waiters gone must `post`
/// enough permits to release them.
#[derive(Debug, Default)]
pub struct Semaphore {
    count: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
            available: Condvar::new(),
        }
    }

    /// Add `n` permits and wake up to `n` waiters
    pub fn post(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut count = self.count.lock();
        *count += n;
        if n == 1 {
            self.available.notify_one();
        } else {
            self.available.notify_all();
        }
    }

    #[inline]
    pub fn post_one(&self) {
        self.post(1);
    }

    /// Block until a permit is available, then take it
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count == 0 {
            self.available.wait(&mut count);
        }
        *count -= 1;
    }

    /// Take a permit if one is available right now
    pub fn try_wait(&self) -> bool {
        let mut count = self.count.lock();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Permits currently available
    pub fn count(&self) -> usize {
        *self.count.lock()
    }
}

//! Blocking double-ended task queue with a terminal "done" state

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,
    done: bool,
}

/// Unbounded thread-safe deque.
///
/// Poppers block while the queue is empty. After [`done`](Self::done) they
/// never block again: remaining items are still handed out, then `None`.
#[derive(Debug)]
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    ready: Condvar,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                done: false,
            }),
            ready: Condvar::new(),
        }
    }

    pub fn push_back(&self, item: T) {
        let mut state = self.state.lock();
        state.items.push_back(item);
        self.ready.notify_one();
    }

    /// Priority insertion: the item is popped before anything already queued
    pub fn push_front(&self, item: T) {
        let mut state = self.state.lock();
        state.items.push_front(item);
        self.ready.notify_one();
    }

    /// Block until an item is available or the queue is done and drained
    pub fn pop_blocking(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            if state.done {
                return None;
            }
            self.ready.wait(&mut state);
        }
    }

    pub fn try_pop(&self) -> Option<T> {
        self.state.lock().items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Drop every queued item; the done state is left untouched
    pub fn clear(&self) {
        // Items are dropped after the lock is released
        let drained = std::mem::take(&mut self.state.lock().items);
        drop(drained);
    }

    /// Enter the terminal state and wake every blocked popper. Idempotent.
    pub fn done(&self) {
        let mut state = self.state.lock();
        state.done = true;
        self.ready.notify_all();
    }

    pub fn is_done(&self) -> bool {
        self.state.lock().done
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

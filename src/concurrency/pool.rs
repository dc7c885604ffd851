//! Fixed-size worker pool with priority submission

use super::queue::TaskQueue;
use crate::core::logger::panic_message;
use crate::core::{Logger, LoggerError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Unit of work run by the pool. Tasks report their own failures.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of threads draining one shared [`TaskQueue`].
///
/// Dropping the pool lets running tasks finish, abandons queued ones and
/// joins every worker. A panicking task is caught and logged at `Error`
/// level; its worker keeps serving the queue.
///
/// # Example
///
/// ```
/// use rust_log_pipeline::WorkerPool;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = WorkerPool::new(2).unwrap();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// pool.submit(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// ```
pub struct WorkerPool {
    queue: Arc<TaskQueue<Task>>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `threads` workers; task panics are reported to [`Logger::global`]
    pub fn new(threads: usize) -> Result<Self> {
        Self::start(threads, None)
    }

    /// Start `threads` workers that report task panics to `logger`
    pub fn with_logger(threads: usize, logger: Arc<Logger>) -> Result<Self> {
        Self::start(threads, Some(logger))
    }

    fn start(threads: usize, logger: Option<Arc<Logger>>) -> Result<Self> {
        if threads == 0 {
            return Err(LoggerError::config(
                "WorkerPool",
                "thread count must be at least 1",
            ));
        }

        let mut pool = Self {
            queue: Arc::new(TaskQueue::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
            workers: Vec::with_capacity(threads),
        };

        for index in 0..threads {
            let name = format!("worker-pool-{}", index);
            let queue = Arc::clone(&pool.queue);
            let shutdown = Arc::clone(&pool.shutdown);
            let logger = logger.clone();

            // On error the partially built pool is dropped, joining started workers
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || Self::worker_loop(&queue, &shutdown, logger.as_deref()))
                .map_err(|e| LoggerError::thread_spawn(name, e))?;
            pool.workers.push(handle);
        }

        Ok(pool)
    }

    fn worker_loop(queue: &TaskQueue<Task>, shutdown: &AtomicBool, logger: Option<&Logger>) {
        while let Some(task) = queue.pop_blocking() {
            if shutdown.load(Ordering::Acquire) {
                break;
            }
            if let Err(panic_info) = panic::catch_unwind(AssertUnwindSafe(task)) {
                let logger = logger.unwrap_or_else(|| Logger::global());
                crate::error!(
                    logger,
                    "Worker task panicked: {}. Worker continues.",
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }

    /// Queue a task behind everything already submitted
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push_back(Box::new(task));
    }

    /// Queue a task ahead of everything not yet started
    pub fn submit_priority<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push_front(Box::new(task));
    }

    pub fn submit_with<F>(&self, task: F, priority: bool)
    where
        F: FnOnce() + Send + 'static,
    {
        if priority {
            self.submit_priority(task);
        } else {
            self.submit(task);
        }
    }

    /// Drop every queued task that has not started yet
    pub fn clean_tasks(&self) {
        self.queue.clear();
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.queue.done();

        for handle in self.workers.drain(..) {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Worker thread panicked during shutdown: {:?}", e);
            }
        }
    }
}

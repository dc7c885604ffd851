//! Writers that take delivery of events off the producer's thread

use super::{
    error::{LoggerError, Result},
    log_event::LogEvent,
    logger::{ChannelRegistry, Logger},
};
use crate::concurrency::Semaphore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const ASYNC_WRITER_THREAD: &str = "async-log-writer";

/// Receives every event a [`Logger`] is asked to write once installed with
/// [`Logger::set_writer`].
pub trait LogWriter: Send + Sync {
    fn write(&self, event: Arc<LogEvent>);
}

struct WriterShared {
    pending: Mutex<Vec<Arc<LogEvent>>>,
    signal: Semaphore,
    exit: AtomicBool,
    registry: Arc<ChannelRegistry>,
}

impl WriterShared {
    /// Swap the pending list out and deliver it outside the lock
    fn flush_all(&self) {
        let batch = std::mem::take(&mut *self.pending.lock());
        self.registry.write_channels(&batch);
    }

    fn run(&self) {
        while !self.exit.load(Ordering::Acquire) {
            self.signal.wait();
            self.flush_all();
        }
    }
}

/// Delivers events to a logger's channels from one background thread.
///
/// `write` only appends to a pending list; the thread drains that list in
/// FIFO order. Dropping the writer joins the thread and flushes whatever is
/// still pending, so no accepted event is lost.
///
/// # Example
///
/// ```
/// use rust_log_pipeline::prelude::*;
///
/// let logger = Logger::new("app");
/// logger.add_channel(ConsoleChannel::new());
/// let writer = AsyncLogWriter::new(&logger).unwrap();
/// logger.set_writer(Some(Box::new(writer)));
/// logger.info("delivered by the background thread");
/// logger.shutdown();
/// ```
pub struct AsyncLogWriter {
    shared: Arc<WriterShared>,
    thread: Option<JoinHandle<()>>,
}

impl AsyncLogWriter {
    pub fn new(logger: &Logger) -> Result<Self> {
        let shared = Arc::new(WriterShared {
            pending: Mutex::new(Vec::new()),
            signal: Semaphore::new(0),
            exit: AtomicBool::new(false),
            registry: logger.registry(),
        });

        let worker = Arc::clone(&shared);
        let thread = thread::Builder::new()
            .name(ASYNC_WRITER_THREAD.to_string())
            .spawn(move || worker.run())
            .map_err(|e| LoggerError::thread_spawn(ASYNC_WRITER_THREAD, e))?;

        Ok(Self {
            shared,
            thread: Some(thread),
        })
    }

    /// Events accepted but not yet delivered
    pub fn pending_len(&self) -> usize {
        self.shared.pending.lock().len()
    }
}

impl LogWriter for AsyncLogWriter {
    fn write(&self, event: Arc<LogEvent>) {
        self.shared.pending.lock().push(event);
        self.shared.signal.post_one();
    }
}

impl Drop for AsyncLogWriter {
    fn drop(&mut self) {
        self.shared.exit.store(true, Ordering::Release);
        self.shared.signal.post_one();

        if let Some(handle) = self.thread.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Async writer thread panicked during shutdown: {:?}", e);
            }
        }

        // Anything queued after the thread's last drain
        self.shared.flush_all();
    }
}

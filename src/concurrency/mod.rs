//! Thread coordination primitives used by the pipeline

pub mod pool;
pub mod queue;
pub mod semaphore;

pub use pool::{Task, WorkerPool};
pub use queue::TaskQueue;
pub use semaphore::Semaphore;

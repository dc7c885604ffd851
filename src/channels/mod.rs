//! Channel implementations

pub mod console;
pub mod file;
pub mod rotating_file;

pub use console::ConsoleChannel;
pub use file::FileChannel;
pub use rotating_file::RotatingFileChannel;

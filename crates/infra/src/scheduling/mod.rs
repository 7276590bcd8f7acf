//! Scheduling infrastructure for the periodic board refresh
//!
//! The scheduler follows explicit lifecycle rules:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on all async operations

pub mod board_scheduler;
pub mod error;

pub use board_scheduler::{BoardScheduler, BoardSchedulerConfig};
pub use error::{SchedulerError, SchedulerResult};

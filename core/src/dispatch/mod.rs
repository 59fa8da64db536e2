//! The batch request dispatcher.
//!
//! Pipeline, leaf-first:
//!
//! ```text
//! Vec<Row> x selected providers
//!   ↓
//! TaskMatrix::build()          row-major task list, output column per provider
//!   ↓
//! run_in_groups()              batched-barrier admission, ≤ concurrency in flight
//!   ↓
//! run_with_retry()             up to max_retries attempts per task
//!   ↓
//! CompletionClient::complete() one bounded-time HTTP attempt
//!   ↓
//! ResultStore / LogSink / ProgressTracker   terminal outcome fan-out
//! ```
//!
//! A run never fails as a whole: every task ends in a terminal outcome that
//! is written into its own result cell.

mod attempt;
mod engine;
mod log;
mod monitor;
mod progress;
mod retry;
mod scheduler;
mod task;

pub use attempt::{CompletionClient, HttpCompletionClient};
pub use engine::{DispatchSummary, Dispatcher};
pub use log::LogSink;
pub use monitor::ProgressMonitor;
pub use progress::ProgressTracker;
pub use retry::{run_with_retry, TaskOutcome};
pub use scheduler::run_in_groups;
pub use task::{Task, TaskMatrix};

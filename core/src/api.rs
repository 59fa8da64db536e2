//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `promptbatch_core::api` instead of reaching into
//! internal modules.

pub use crate::catalog::{load_catalog, Provider, ProviderCatalog};
pub use crate::config::{load_default, AppConfig, LoggingConfig, RequestConfig};
pub use crate::dispatch::{
    CompletionClient, DispatchSummary, Dispatcher, HttpCompletionClient, LogSink,
    ProgressMonitor, ProgressTracker, TaskOutcome,
};
pub use crate::error::{AttemptError, DispatchError};
pub use crate::grid::{ResultGrid, Row};
pub use crate::template::{render, variables};

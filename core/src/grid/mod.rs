//! The result grid: rows mutated in place as tasks reach terminal outcomes.

mod store;

pub use store::{ResultGrid, ResultStore};

/// One data row: column name to scalar cell (string, number, or empty).
pub type Row = serde_json::Map<String, serde_json::Value>;

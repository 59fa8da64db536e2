use std::sync::Mutex;

use serde_json::Value;

use crate::dispatch::TaskOutcome;

use super::Row;

/// Holds the row grid during a run. Concurrent tasks write terminal outcomes
/// into their own `(row, column)` cell; the matrix builder guarantees no two
/// tasks share one, so the mutex only serializes the short insert.
#[derive(Debug)]
pub struct ResultStore {
    rows: Mutex<Vec<Row>>,
}

impl ResultStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Record a task's terminal outcome into its output cell.
    pub fn record(&self, row_index: usize, column: &str, outcome: &TaskOutcome) {
        let text = match outcome {
            TaskOutcome::Success { text } => text.clone(),
            TaskOutcome::Failed { reason } => format!("Request failed: {reason}"),
        };

        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.get_mut(row_index) {
            row.insert(column.to_string(), Value::String(text));
        }
    }

    /// Copy of the grid as it stands; usable while the run is in flight.
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.lock().unwrap().clone()
    }
}

/// The finalized grid plus the column sets a consumer needs to export it.
#[derive(Debug, Clone)]
pub struct ResultGrid {
    pub rows: Vec<Row>,

    /// Template variables, in first-appearance order.
    pub columns: Vec<String>,

    /// One output column per resolved provider, in selection order.
    pub output_columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        vec![
            json!({"q": "one"}).as_object().unwrap().clone(),
            json!({"q": "two"}).as_object().unwrap().clone(),
        ]
    }

    #[test]
    fn test_record_success_and_failure() {
        let store = ResultStore::new(rows());

        store.record(
            0,
            "gpt_output",
            &TaskOutcome::Success {
                text: "hello".to_string(),
            },
        );
        store.record(
            1,
            "gpt_output",
            &TaskOutcome::Failed {
                reason: "HTTP 500 Internal Server Error".to_string(),
            },
        );

        let grid = store.snapshot();
        assert_eq!(grid[0]["gpt_output"], "hello");
        assert_eq!(
            grid[1]["gpt_output"],
            "Request failed: HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_record_out_of_range_is_ignored() {
        let store = ResultStore::new(rows());
        store.record(
            9,
            "gpt_output",
            &TaskOutcome::Success {
                text: "x".to_string(),
            },
        );
        assert_eq!(store.row_count(), 2);
    }
}

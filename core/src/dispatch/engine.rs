use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::catalog::ProviderCatalog;
use crate::config::RequestConfig;
use crate::error::DispatchError;
use crate::grid::{ResultGrid, ResultStore, Row};
use crate::template;

use super::attempt::{CompletionClient, HttpCompletionClient};
use super::log::LogSink;
use super::progress::ProgressTracker;
use super::retry::run_with_retry;
use super::scheduler::run_in_groups;
use super::task::{Task, TaskMatrix};

/// What a finished run hands back: the mutated grid and the run counters.
#[derive(Debug, Clone)]
pub struct DispatchSummary {
    pub grid: ResultGrid,
    pub total: usize,
    pub completed: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
}

/// One dispatch run: rows x providers expanded up front, then driven to
/// 100% completion. The run itself cannot fail; every task degrades into
/// its own result cell at worst.
pub struct Dispatcher {
    tasks: Vec<Task>,
    prompts: Arc<Vec<String>>,
    columns: Vec<String>,
    output_columns: Vec<String>,
    request: RequestConfig,
    client: Arc<dyn CompletionClient>,
    store: Arc<ResultStore>,
    progress: Arc<ProgressTracker>,
    logs: Arc<LogSink>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tasks", &self.tasks.len())
            .field("columns", &self.columns)
            .field("output_columns", &self.output_columns)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Validate the request knobs, expand the task matrix, and pre-render
    /// one prompt per row. `total` is fixed from here on.
    pub fn new(
        catalog: &ProviderCatalog,
        rows: Vec<Row>,
        raw_template: &str,
        selected: &[String],
        request: RequestConfig,
    ) -> Result<Self, DispatchError> {
        request.validate()?;

        let matrix = TaskMatrix::build(&rows, catalog, selected)?;
        let prompts: Vec<String> = rows
            .iter()
            .map(|row| template::render(raw_template, row))
            .collect();
        let columns = template::variables(raw_template);

        let total = matrix.tasks.len();
        let client = Arc::new(HttpCompletionClient::new()?);

        Ok(Self {
            tasks: matrix.tasks,
            prompts: Arc::new(prompts),
            columns,
            output_columns: matrix.output_columns,
            request,
            client,
            store: Arc::new(ResultStore::new(rows)),
            progress: Arc::new(ProgressTracker::new(total)),
            logs: Arc::new(LogSink::new()),
        })
    }

    /// Swap the transport; used by tests and embedders with their own client.
    pub fn with_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = client;
        self
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    /// Live counters; clone before `run()` to observe a run in flight.
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    /// Live log feed; clone before `run()` to observe a run in flight.
    pub fn logs(&self) -> Arc<LogSink> {
        Arc::clone(&self.logs)
    }

    /// Drive every task to a terminal outcome and finalize the grid.
    pub async fn run(self) -> DispatchSummary {
        let run_id = Uuid::new_v4();
        let total = self.tasks.len();
        let started_at = chrono::Utc::now();
        let started = Instant::now();

        tracing::info!(
            target: "promptbatch.dispatch",
            run_id = %run_id,
            total,
            concurrency = self.request.concurrency,
            timeout_seconds = self.request.timeout_seconds,
            max_retries = self.request.max_retries,
            "dispatch run starting"
        );

        let request = self.request;
        let futures: Vec<_> = self
            .tasks
            .into_iter()
            .map(|task| {
                let client = Arc::clone(&self.client);
                let store = Arc::clone(&self.store);
                let progress = Arc::clone(&self.progress);
                let logs = Arc::clone(&self.logs);
                let prompts = Arc::clone(&self.prompts);

                async move {
                    let prompt = &prompts[task.row_index];
                    let outcome =
                        run_with_retry(client.as_ref(), &task, prompt, &request, &logs).await;
                    store.record(task.row_index, &task.column, &outcome);
                    progress.mark_complete();
                }
            })
            .collect();

        run_in_groups(futures, request.concurrency).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        let completed = self.progress.completed();

        tracing::info!(
            target: "promptbatch.dispatch",
            run_id = %run_id,
            completed,
            total,
            duration_ms,
            "dispatch run finished"
        );

        DispatchSummary {
            grid: ResultGrid {
                rows: self.store.snapshot(),
                columns: self.columns,
                output_columns: self.output_columns,
            },
            total,
            completed,
            started_at,
            duration_ms,
        }
    }
}

use crate::config::RequestConfig;
use crate::dispatch::attempt::CompletionClient;
use crate::dispatch::log::LogSink;
use crate::dispatch::task::Task;

/// Terminal result of one task. There is no in-progress variant: callers
/// only ever see a finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success { text: String },
    Failed { reason: String },
}

/// Drive a task through up to `max_retries` attempts.
///
/// First success wins; a failed attempt before the last logs a retry notice,
/// the last logs a terminal failure. Never returns an error: exhaustion
/// degrades into `Failed` with the last attempt's message.
pub async fn run_with_retry(
    client: &dyn CompletionClient,
    task: &Task,
    prompt: &str,
    request: &RequestConfig,
    sink: &LogSink,
) -> TaskOutcome {
    let row = task.row_index + 1;
    let name = &task.provider.name;
    let mut last_error = String::new();

    for attempt in 1..=request.max_retries {
        match client
            .complete(&task.provider, prompt, request.timeout_seconds)
            .await
        {
            Ok(text) => {
                tracing::debug!(
                    target: "promptbatch.dispatch",
                    row,
                    provider = %task.provider.id,
                    attempt,
                    "attempt succeeded"
                );
                sink.append(format!("Row {row}: {name} request successful."));
                return TaskOutcome::Success { text };
            }
            Err(err) => {
                tracing::debug!(
                    target: "promptbatch.dispatch",
                    row,
                    provider = %task.provider.id,
                    attempt,
                    kind = err.kind(),
                    error = %err,
                    "attempt failed"
                );
                last_error = err.to_string();
                if attempt == request.max_retries {
                    sink.append(format!("Row {row}: {name} request failed - {last_error}"));
                } else {
                    sink.append(format!(
                        "Row {row}: {name} retrying ({attempt}/{})...",
                        request.max_retries
                    ));
                }
            }
        }
    }

    TaskOutcome::Failed { reason: last_error }
}

//! CLI assembly layer: loads the catalog, rows, and template, runs a
//! dispatch with a live progress bar, and writes the finalized grid.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use promptbatch_core::api as core_api;

use crate::commands::cli::{ProvidersArgs, RunArgs};

pub async fn run_dispatch(
    run: RunArgs,
    cfg: core_api::AppConfig,
) -> Result<i32, core_api::DispatchError> {
    let template = load_template(&run)?;
    let rows = load_rows(&run.rows)?;

    let providers_path = run
        .providers_file
        .as_deref()
        .unwrap_or(&cfg.providers_path);
    let catalog = core_api::load_catalog(Path::new(providers_path))?;

    let selected = if run.select.is_empty() {
        catalog.ids()
    } else {
        run.select.clone()
    };

    let mut request = cfg.request;
    if let Some(n) = run.concurrency {
        request.concurrency = n;
    }
    if let Some(n) = run.timeout {
        request.timeout_seconds = n;
    }
    if let Some(n) = run.retries {
        request.max_retries = n;
    }

    let dispatcher =
        core_api::Dispatcher::new(&catalog, rows, &template, &selected, request)?;

    let progress = dispatcher.progress();
    let logs = dispatcher.logs();

    let show_bar = !run.no_progress && atty::is(atty::Stream::Stderr);
    let monitor = Arc::new(core_api::ProgressMonitor::new(progress.total(), show_bar));

    let reporter = {
        let progress = Arc::clone(&progress);
        let logs = Arc::clone(&logs);
        let monitor = Arc::clone(&monitor);
        tokio::spawn(async move {
            let mut seen = 0usize;
            loop {
                for line in logs.since(seen) {
                    monitor.println(&line);
                    seen += 1;
                }
                monitor.set_completed(progress.completed());
                monitor.set_message(&format!("{}%", progress.percent()));
                if progress.is_complete() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            // Lines appended by the last tasks after the previous drain.
            for line in logs.since(seen) {
                monitor.println(&line);
            }
            monitor.set_completed(progress.completed());
        })
    };

    let summary = dispatcher.run().await;
    let _ = reporter.await;

    let failed = count_failures(&summary);
    monitor.finish(failed == 0);

    let output_path = run
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(chrono::Utc::now()));
    write_grid(&output_path, &summary.grid)?;

    println!(
        "{}/{} tasks completed ({} failed) in {}ms -> {}",
        summary.completed, summary.total, failed, summary.duration_ms, output_path
    );

    Ok(if failed == 0 { 0 } else { 1 })
}

pub fn list_providers(
    args: ProvidersArgs,
    cfg: core_api::AppConfig,
) -> Result<i32, core_api::DispatchError> {
    let providers_path = args
        .providers_file
        .as_deref()
        .unwrap_or(&cfg.providers_path);
    let catalog = core_api::load_catalog(Path::new(providers_path))?;

    for provider in catalog.providers() {
        println!(
            "{}\t{}\t{}\t{}",
            provider.id, provider.name, provider.model, provider.endpoint
        );
    }
    Ok(0)
}

fn load_template(run: &RunArgs) -> Result<String, core_api::DispatchError> {
    match (&run.template, &run.template_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(core_api::DispatchError::Config(
            "either --template or --template-file is required".to_string(),
        )),
    }
}

fn load_rows(path: &str) -> Result<Vec<core_api::Row>, core_api::DispatchError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        core_api::DispatchError::Config(format!("{path}: expected a JSON array of objects: {e}"))
    })
}

fn write_grid(path: &str, grid: &core_api::ResultGrid) -> Result<(), core_api::DispatchError> {
    let body = serde_json::to_string_pretty(&grid.rows)
        .map_err(|e| core_api::DispatchError::Config(format!("serialize results: {e}")))?;
    std::fs::write(path, body)?;
    tracing::info!(path, rows = grid.rows.len(), "results written");
    Ok(())
}

fn count_failures(summary: &core_api::DispatchSummary) -> usize {
    summary
        .grid
        .rows
        .iter()
        .flat_map(|row| summary.grid.output_columns.iter().filter_map(|c| row.get(c)))
        .filter(|cell| {
            cell.as_str()
                .is_some_and(|s| s.starts_with("Request failed: "))
        })
        .count()
}

fn default_output_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("Results_{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{Provider, ProviderCatalog};
use crate::error::DispatchError;
use crate::grid::Row;

/// One (row, provider) unit of work. Immutable; retries happen inside it.
#[derive(Debug, Clone)]
pub struct Task {
    pub row_index: usize,
    pub provider: Arc<Provider>,
    /// Output column this task writes, assigned once at matrix build.
    pub column: String,
}

/// The expanded work list plus the column layout derived from it.
#[derive(Debug, Clone)]
pub struct TaskMatrix {
    /// Row-major: all providers for row 0, then row 1, ...
    pub tasks: Vec<Task>,
    /// Resolved providers in selection order.
    pub providers: Vec<Arc<Provider>>,
    /// Output column per resolved provider, same order as `providers`.
    pub output_columns: Vec<String>,
}

impl TaskMatrix {
    /// Expand rows x selected providers into the ordered task list.
    ///
    /// Selection ids that the catalog cannot resolve are skipped with a
    /// warning; their (row, provider) pairs simply never exist. An empty
    /// selection is a config error.
    pub fn build(
        rows: &[Row],
        catalog: &ProviderCatalog,
        selected: &[String],
    ) -> Result<Self, DispatchError> {
        if selected.is_empty() {
            return Err(DispatchError::Config(
                "no providers selected".to_string(),
            ));
        }

        let mut providers = Vec::new();
        for id in selected {
            match catalog.resolve(id) {
                Some(p) => providers.push(Arc::new(p.clone())),
                None => {
                    tracing::warn!(provider_id = %id, "provider not in catalog, skipping");
                }
            }
        }

        let output_columns = assign_output_columns(&providers);

        let mut tasks = Vec::with_capacity(rows.len() * providers.len());
        for row_index in 0..rows.len() {
            for (provider, column) in providers.iter().zip(&output_columns) {
                tasks.push(Task {
                    row_index,
                    provider: Arc::clone(provider),
                    column: column.clone(),
                });
            }
        }

        Ok(Self {
            tasks,
            providers,
            output_columns,
        })
    }
}

/// Columns are keyed by provider id, labeled by name: the first provider
/// with a given name gets `<name>_output`; a later provider whose display
/// name collides gets `<name>_<id>_output` so no two tasks share a cell.
fn assign_output_columns(providers: &[Arc<Provider>]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    providers
        .iter()
        .map(|p| {
            if seen.insert(p.name.as_str()) {
                format!("{}_output", p.name)
            } else {
                format!("{}_{}_output", p.name, p.id)
            }
        })
        .collect()
}

use serde::{Deserialize, Serialize};

/// A completion provider endpoint. Immutable for the duration of a dispatch
/// run; the dispatcher only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Opaque identifier, unique within the catalog.
    pub id: String,

    /// Display name; also the basis of the provider's output column.
    pub name: String,

    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Bearer credential. Empty means no Authorization header.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier sent in the request body.
    pub model: String,
}

/// Read-only snapshot of the provider catalog, injected at dispatch-run
/// start. Lookup order matches the catalog file.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
}

impl ProviderCatalog {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn resolve(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

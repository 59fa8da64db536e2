use std::path::Path;

use serde::Deserialize;

use super::types::{Provider, ProviderCatalog};
use crate::error::DispatchError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    providers: Vec<Provider>,
}

/// Load a provider catalog from a TOML file (`[[providers]]` entries).
///
/// Credentials may be kept out of the file: `PROMPTBATCH_API_KEY_<ID>`
/// (id uppercased, `-` mapped to `_`) overrides `api_key` per provider.
pub fn load_catalog(path: &Path) -> Result<ProviderCatalog, DispatchError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DispatchError::Catalog(format!("cannot read {}: {e}", path.display()))
    })?;

    let file: CatalogFile = toml::from_str(&raw)
        .map_err(|e| DispatchError::Catalog(format!("{}: {e}", path.display())))?;

    let mut providers = file.providers;
    for provider in &mut providers {
        let var = format!(
            "PROMPTBATCH_API_KEY_{}",
            provider.id.to_uppercase().replace('-', "_")
        );
        if let Ok(v) = std::env::var(&var) {
            if !v.trim().is_empty() {
                provider.api_key = v;
            }
        }
    }

    // Duplicate ids would make selection ambiguous.
    for (i, provider) in providers.iter().enumerate() {
        if providers[..i].iter().any(|p| p.id == provider.id) {
            return Err(DispatchError::Catalog(format!(
                "duplicate provider id: {}",
                provider.id
            )));
        }
    }

    tracing::debug!(
        path = %path.display(),
        providers = providers.len(),
        "provider catalog loaded"
    );

    Ok(ProviderCatalog::new(providers))
}

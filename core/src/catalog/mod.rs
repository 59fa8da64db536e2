//! Provider catalog: who we can send completions to.
//!
//! The catalog is owned by the caller and handed to the dispatcher as a
//! read-only snapshot; nothing here mutates mid-run.

mod load;
mod types;

pub use load::load_catalog;
pub use types::{Provider, ProviderCatalog};

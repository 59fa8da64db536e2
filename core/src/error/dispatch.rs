use thiserror::Error;

/// Errors raised while setting up a dispatch run. Once a run starts, nothing
/// is fatal: per-task failures degrade into result cells instead.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("config error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub request: RequestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to the provider catalog file.
    #[serde(default = "default_providers_path")]
    pub providers_path: String,
}

fn default_providers_path() -> String {
    "providers.toml".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request: RequestConfig::default(),
            logging: LoggingConfig::default(),
            providers_path: default_providers_path(),
        }
    }
}

/// Knobs for one dispatch run. Read-only once the run starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum number of tasks in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Hard upper bound on a single attempt, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Total attempts per task, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_concurrency() -> usize {
    10
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl RequestConfig {
    /// Every knob must be at least 1.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.concurrency < 1 {
            return Err(DispatchError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_seconds < 1 {
            return Err(DispatchError::Config(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        if self.max_retries < 1 {
            return Err(DispatchError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "promptbatch_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default promptbatch data directory: ~/.promptbatch
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".promptbatch"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.promptbatch/config.toml (highest)
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./promptbatch.toml (current directory)
    let local_config = Path::new("promptbatch.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("PROMPTBATCH_PROVIDERS") {
        if !v.trim().is_empty() {
            cfg.providers_path = v;
        }
    }
    if let Ok(v) = std::env::var("PROMPTBATCH_CONCURRENCY") {
        if let Ok(n) = v.trim().parse() {
            cfg.request.concurrency = n;
        }
    }
    if let Ok(v) = std::env::var("PROMPTBATCH_TIMEOUT_SECONDS") {
        if let Ok(n) = v.trim().parse() {
            cfg.request.timeout_seconds = n;
        }
    }
    if let Ok(v) = std::env::var("PROMPTBATCH_MAX_RETRIES") {
        if let Ok(n) = v.trim().parse() {
            cfg.request.max_retries = n;
        }
    }

    Ok(cfg)
}

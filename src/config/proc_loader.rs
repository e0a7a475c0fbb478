use std::path::Path;
use crate::config::settings::{LoggingConfig, RelayConfig};
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load config from YAML file, expanding `${VAR}` and `${VAR:default}` first
pub async fn file_to_config(path: &Path) -> Result<RelayConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read config {}", path.display()))?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<RelayConfig> {
    let mut relay_config: RelayConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
        })?;

    // Apply defaults
    if relay_config.settings.logging.is_none() {
        relay_config.settings.logging = Some(LoggingConfig::default());
    }
    debug!("config loaded, store path: {}", relay_config.store.path);

    Ok(relay_config)
}

fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("env var pattern");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

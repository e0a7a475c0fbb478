use std::path::Path;
use anyhow::{anyhow, Result};

use crate::config::proc_loader::file_to_config;
use crate::config::settings::RelayConfig;

/// Loads the config file when one is given, otherwise returns the defaults.
pub async fn run(config_path: Option<&str>) -> Result<RelayConfig> {
    match config_path {
        Some(config_path) => {
            let path = Path::new(config_path);
            file_to_config(path)
                .await
                .map_err(|e| anyhow!(format!("Invalid config format: {}", e)))
        }
        None => Ok(RelayConfig::default()),
    }
}

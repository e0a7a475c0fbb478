// tests/common/mod.rs
pub use serde_json::json;

use std::path::PathBuf;
use reqwest::Client;
use tempfile::TempDir;

use crate::utils::constants::{ENV_FORWARD_KEY, ENV_FORWARD_URL};

pub const TEST_KEY: &str = "pouch-key-123";

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Temp dir holding `tokens.json` seeded with `content`; keep the dir alive for the test.
pub async fn seeded_store(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tokens.json");
    tokio::fs::write(&path, content).await.expect("seed store");
    (dir, path)
}

pub fn set_endpoint_env(url: &str, key: &str) {
    std::env::set_var(ENV_FORWARD_URL, url);
    std::env::set_var(ENV_FORWARD_KEY, key);
}

pub fn clear_endpoint_env() {
    std::env::remove_var(ENV_FORWARD_URL);
    std::env::remove_var(ENV_FORWARD_KEY);
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sync::ConflictPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Where persisted slots live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the durable slots. Defaults to
    /// `<data_dir>/quotebook` via `dirs::data_dir()`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Remote endpoint and reconciliation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Endpoint used for both `GET` (fetch) and `POST` (publish).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds between scheduled reconciliations (default: 30).
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
    /// Items taken from each fetched batch (default: 5).
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
    /// Category given to every fetched quote (default: "Server").
    #[serde(default = "default_remote_category")]
    pub remote_category: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Publish newly added quotes to the endpoint (default: true).
    #[serde(default = "default_post_new_quotes")]
    pub post_new_quotes: bool,
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_interval_seconds() -> u64 {
    30
}

fn default_batch_limit() -> usize {
    5
}

fn default_remote_category() -> String {
    "Server".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_post_new_quotes() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_seconds: default_interval_seconds(),
            batch_limit: default_batch_limit(),
            remote_category: default_remote_category(),
            timeout_seconds: default_timeout_seconds(),
            post_new_quotes: default_post_new_quotes(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

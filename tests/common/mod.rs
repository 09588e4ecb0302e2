//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use quotebook::config::SyncConfig;
use quotebook::quote::Quote;
use quotebook::repository::QuoteRepository;
use quotebook::session::QuoteSession;
use quotebook::storage::{KeyValueStore, MemoryStore, StorageError};
use quotebook::ui::app::App;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sync settings pointed at `endpoint` with short timeouts.
pub fn sync_config(endpoint: &str) -> SyncConfig {
    SyncConfig {
        endpoint: endpoint.to_string(),
        timeout_seconds: 2,
        ..SyncConfig::default()
    }
}

/// Session backed by in-memory stores, holding `quotes`.
pub fn memory_session(quotes: &[Quote]) -> QuoteSession {
    let repository = QuoteRepository::in_memory();
    repository.save_quotes(quotes).expect("save quotes");
    QuoteSession::open(repository).expect("open session")
}

/// Session backed by in-memory stores holding the seed set.
pub fn seeded_session() -> QuoteSession {
    QuoteSession::open(QuoteRepository::in_memory()).expect("open session")
}

/// Session backed by files under `dir`.
pub fn file_session(dir: &Path) -> QuoteSession {
    let repository = QuoteRepository::open(dir).expect("open repository");
    QuoteSession::open(repository).expect("open session")
}

/// Durable store that reads as empty and rejects every write.
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            path: PathBuf::from("/read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Seeded session whose durable writes always fail.
pub fn read_only_session() -> QuoteSession {
    let repository = QuoteRepository::new(Box::new(ReadOnlyStore), Box::new(MemoryStore::new()));
    QuoteSession::open(repository).expect("open session")
}

/// Write a config file that points sync at `endpoint`.
pub fn temp_config(endpoint: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    let content = format!(
        r#"[storage]
data_dir = "{}"

[sync]
endpoint = "{}"
timeout_seconds = 2
"#,
        temp_dir.path().join("data").display(),
        endpoint
    );
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- App helpers --------------------------------------------------------------

pub fn make_app(quotes: &[Quote]) -> App {
    App::new(
        memory_session(quotes),
        sync_config("http://127.0.0.1:9/posts"),
        std::env::temp_dir().join("quotebook-test-export.json"),
    )
}

pub fn seeded_app() -> App {
    App::new(
        seeded_session(),
        sync_config("http://127.0.0.1:9/posts"),
        std::env::temp_dir().join("quotebook-test-export.json"),
    )
}

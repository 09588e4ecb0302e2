//! Key-value persistence slots.
//!
//! A slot holds a single string under a short key. [`FileStore`] keeps slots
//! on disk across runs; [`MemoryStore`] keeps them for the life of the
//! process only.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a slot store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create storage directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage at '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read slot '{key}' from '{path}': {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slot '{key}' to '{path}': {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode slot '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid slot key '{key}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey { key: String },
}

/// A string-valued key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Current value of `key`, or `None` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value of `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Clear `key`. Clearing an empty slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

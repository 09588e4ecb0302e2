//! JSON export and import of the whole collection.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::quote::Quote;

/// File name used when no export path is given.
pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid JSON file: expected an array of quotes")]
    NotAnArray,

    #[error("Invalid quote at index {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode quotes: {0}")]
    Encode(#[source] serde_json::Error),
}

pub fn export_json(quotes: &[Quote]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(quotes).map_err(TransferError::Encode)
}

pub fn export_to(path: &Path, quotes: &[Quote]) -> Result<(), TransferError> {
    let json = export_json(quotes)?;
    fs::write(path, json).map_err(|source| TransferError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an import payload.
///
/// The payload must be a JSON array. Entries are taken as quotes without
/// checking their fields; missing `text` or `category` become empty
/// strings. Any failure rejects the whole payload.
pub fn parse_import(raw: &str) -> Result<Vec<Quote>, TransferError> {
    let value: Value = serde_json::from_str(raw).map_err(TransferError::Parse)?;
    let Value::Array(items) = value else {
        return Err(TransferError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| TransferError::Entry { index, source })
        })
        .collect()
}

pub fn import_from(path: &Path) -> Result<Vec<Quote>, TransferError> {
    let raw = fs::read_to_string(path).map_err(|source| TransferError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_import(&raw)
}

//! Typed access to the persisted quote state.
//!
//! Three slots, each with its own lifetime:
//!
//! | slot                 | store   | contents                       |
//! |----------------------|---------|--------------------------------|
//! | `quotesData`         | durable | JSON array of quotes           |
//! | `lastCategoryFilter` | durable | `"all"` or a category, verbatim|
//! | `lastViewedQuote`    | session | JSON object of one quote       |

use std::path::Path;

use tracing::warn;

use crate::filter::CategoryFilter;
use crate::quote::{seed_quotes, Quote};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

pub const QUOTES_KEY: &str = "quotesData";
pub const FILTER_KEY: &str = "lastCategoryFilter";
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

pub struct QuoteRepository {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl QuoteRepository {
    pub fn new(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Durable slots under `data_dir`, session slots in memory.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(
            Box::new(FileStore::open(data_dir)?),
            Box::new(MemoryStore::new()),
        ))
    }

    /// Both stores in memory. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    /// Persisted quotes, or the seed set when the slot is empty or
    /// unreadable as a quote array.
    pub fn load_quotes(&self) -> Result<Vec<Quote>, StorageError> {
        let Some(raw) = self.durable.get(QUOTES_KEY)? else {
            return Ok(seed_quotes());
        };
        if raw.trim().is_empty() {
            return Ok(seed_quotes());
        }
        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(quotes) => Ok(quotes),
            Err(err) => {
                warn!(slot = QUOTES_KEY, error = %err, "Stored quotes are corrupt, using seed set");
                Ok(seed_quotes())
            }
        }
    }

    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<(), StorageError> {
        let json = serde_json::to_string(quotes).map_err(|source| StorageError::Encode {
            key: QUOTES_KEY.to_string(),
            source,
        })?;
        self.durable.set(QUOTES_KEY, &json)
    }

    /// Last selected filter; an empty or missing slot means "all".
    pub fn load_filter(&self) -> Result<CategoryFilter, StorageError> {
        Ok(match self.durable.get(FILTER_KEY)? {
            Some(value) if !value.is_empty() => CategoryFilter::parse(&value),
            _ => CategoryFilter::All,
        })
    }

    pub fn save_filter(&self, filter: &CategoryFilter) -> Result<(), StorageError> {
        self.durable.set(FILTER_KEY, filter.as_str())
    }

    /// Last quote shown this session. An undecodable slot is cleared.
    pub fn last_viewed(&self) -> Result<Option<Quote>, StorageError> {
        let Some(raw) = self.session.get(LAST_VIEWED_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(quote) => Ok(Some(quote)),
            Err(err) => {
                warn!(slot = LAST_VIEWED_KEY, error = %err, "Dropping undecodable last viewed quote");
                self.session.remove(LAST_VIEWED_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn save_last_viewed(&self, quote: &Quote) -> Result<(), StorageError> {
        let json = serde_json::to_string(quote).map_err(|source| StorageError::Encode {
            key: LAST_VIEWED_KEY.to_string(),
            source,
        })?;
        self.session.set(LAST_VIEWED_KEY, &json)
    }
}

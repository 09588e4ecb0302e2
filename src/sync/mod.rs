//! Reconciliation with the remote quote endpoint.
//!
//! ```text
//! SyncScheduler ──tick──→ Reconciler::fetch ──batch──→ QuoteSession::apply_remote
//!                               │                            │
//!                         RemoteSource (HTTP)          merge + persist
//! ```
//!
//! Fetching runs on the tokio runtime; merging happens wherever the
//! session lives, so the collection has a single writer.

pub mod merge;
mod publish;
mod reconciler;
mod remote;
mod scheduler;

use thiserror::Error;

use crate::storage::StorageError;

pub use merge::{ConflictPolicy, MergeOutcome};
pub use publish::spawn_publish;
pub use reconciler::Reconciler;
pub use remote::{batch_from_items, HttpRemote, PostReceipt, RemoteSource};
pub use scheduler::SyncScheduler;

/// Errors raised while talking to the remote endpoint.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{endpoint}' timed out")]
    Timeout { endpoint: String },

    #[error("'{endpoint}' responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("A reconciliation is already in progress")]
    InProgress,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SyncError {
    pub(crate) fn from_send(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SyncError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            SyncError::Request {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }

    /// The client timeout also covers reading the body.
    pub(crate) fn from_body(endpoint: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SyncError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            SyncError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }
}

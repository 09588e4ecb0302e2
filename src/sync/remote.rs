use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::SyncConfig;
use crate::quote::Quote;

use super::SyncError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a successful POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    pub status: u16,
    /// Identifier assigned by the endpoint, when it returned one.
    pub id: Option<u64>,
}

/// A source of remote quotes that can also accept new ones.
pub trait RemoteSource: Send + Sync {
    /// Fetch the next batch, already mapped to quotes.
    fn fetch_batch(&self) -> impl Future<Output = Result<Vec<Quote>, SyncError>> + Send;

    /// Publish a locally added quote.
    fn publish(&self, quote: &Quote) -> impl Future<Output = Result<PostReceipt, SyncError>> + Send;
}

/// Map raw endpoint items to quotes.
///
/// Only the first `limit` items are considered; of those, items without a
/// non-blank string `title` are skipped.
pub fn batch_from_items(items: Vec<Value>, limit: usize, category: &str, at: DateTime<Utc>) -> Vec<Quote> {
    items
        .into_iter()
        .take(limit)
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?.trim();
            (!title.is_empty()).then(|| Quote::stamped(title, category, at))
        })
        .collect()
}

/// JSON-over-HTTP remote: `GET` returns an array of `{ "title": ... }`
/// items, `POST` accepts a quote.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    endpoint: String,
    batch_limit: usize,
    category: String,
}

impl HttpRemote {
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(SyncError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            batch_limit: config.batch_limit,
            category: config.remote_category.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteSource for HttpRemote {
    async fn fetch_batch(&self) -> Result<Vec<Quote>, SyncError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SyncError::from_send(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let items: Vec<Value> = response
            .json()
            .await
            .map_err(|e| SyncError::from_body(&self.endpoint, e))?;
        debug!(endpoint = %self.endpoint, items = items.len(), "Fetched remote items");

        Ok(batch_from_items(items, self.batch_limit, &self.category, Utc::now()))
    }

    async fn publish(&self, quote: &Quote) -> Result<PostReceipt, SyncError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(quote)
            .send()
            .await
            .map_err(|e| SyncError::from_send(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        // The body is informational only; a missing or non-JSON body is fine.
        let id = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("id").and_then(Value::as_u64));

        Ok(PostReceipt {
            status: status.as_u16(),
            id,
        })
    }
}

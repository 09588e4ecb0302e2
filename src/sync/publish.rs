use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::quote::Quote;

use super::{PostReceipt, RemoteSource, SyncError};

/// Publish `quote` in the background.
///
/// The returned handle resolves to the outcome; callers that do not care
/// may drop it. The outcome is never merged back into local state.
pub fn spawn_publish<R>(remote: Arc<R>, quote: Quote) -> JoinHandle<Result<PostReceipt, SyncError>>
where
    R: RemoteSource + 'static,
{
    tokio::spawn(async move {
        let result = remote.publish(&quote).await;
        match &result {
            Ok(receipt) => info!(
                text = %quote.text,
                status = receipt.status,
                id = ?receipt.id,
                "Published quote"
            ),
            Err(err) => warn!(text = %quote.text, error = %err, "Failed to publish quote"),
        }
        result
    })
}

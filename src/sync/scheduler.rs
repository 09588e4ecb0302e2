use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::quote::Quote;
use crate::shutdown::ShutdownHandle;

use super::{Reconciler, RemoteSource, SyncError};

/// Runs a fetch at startup and then on a fixed period until shutdown.
///
/// Each tick fetches on its own task so a slow endpoint never delays the
/// timer; ticks that land while a fetch is pending are dropped by the
/// reconciler's in-flight guard. Fetched batches and failures are handed
/// to `sink`, which decides where the merge happens.
pub struct SyncScheduler<R> {
    reconciler: Reconciler<R>,
    period: Duration,
}

impl<R: RemoteSource + 'static> SyncScheduler<R> {
    pub fn new(reconciler: Reconciler<R>, period: Duration) -> Self {
        Self { reconciler, period }
    }

    /// Start the timer on the current tokio runtime.
    pub fn spawn<F>(self, shutdown: ShutdownHandle, sink: F) -> JoinHandle<()>
    where
        F: Fn(Result<Vec<Quote>, SyncError>) + Send + Sync + 'static,
    {
        let sink = Arc::new(sink);
        tokio::spawn(async move {
            info!(period_secs = self.period.as_secs(), "Sync scheduler started");
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.wait() => break,
                    _ = ticker.tick() => {}
                }

                let reconciler = self.reconciler.clone();
                let sink = Arc::clone(&sink);
                tokio::spawn(async move {
                    match reconciler.fetch().await {
                        Err(SyncError::InProgress) => debug!("Tick skipped, fetch in flight"),
                        Err(err) => {
                            warn!(error = %err, "Scheduled fetch failed");
                            sink(Err(err));
                        }
                        Ok(batch) => sink(Ok(batch)),
                    }
                });
            }
            info!("Sync scheduler stopped");
        })
    }
}

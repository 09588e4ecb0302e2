use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::quote::Quote;
use crate::session::QuoteSession;

use super::{ConflictPolicy, MergeOutcome, RemoteSource, SyncError};

/// Fetches remote batches and merges them into a session.
///
/// At most one fetch is in flight per reconciler (and its clones); a second
/// call while one is pending fails fast with [`SyncError::InProgress`].
pub struct Reconciler<R> {
    remote: Arc<R>,
    policy: ConflictPolicy,
    in_flight: Arc<AtomicBool>,
}

impl<R> Clone for Reconciler<R> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            policy: self.policy,
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Clears the in-flight flag on drop, including on error and cancellation.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<R: RemoteSource> Reconciler<R> {
    pub fn new(remote: Arc<R>, policy: ConflictPolicy) -> Self {
        Self {
            remote,
            policy,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch one remote batch.
    pub async fn fetch(&self) -> Result<Vec<Quote>, SyncError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Skipping fetch, previous reconciliation still running");
            return Err(SyncError::InProgress);
        };
        self.remote.fetch_batch().await
    }

    /// Fetch one batch and merge it into `session`.
    pub async fn reconcile(&self, session: &mut QuoteSession) -> Result<MergeOutcome, SyncError> {
        let batch = self.fetch().await?;
        let outcome = session.apply_remote(batch, self.policy)?;
        info!(
            fetched = outcome.fetched,
            conflicts = outcome.conflicts,
            added = outcome.added,
            total = outcome.total,
            "Reconciled with remote"
        );
        Ok(outcome)
    }
}

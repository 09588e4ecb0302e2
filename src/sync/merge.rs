//! Keyed merge of a remote batch into the local collection.
//!
//! Records are matched by their natural key (the quote text). Existing keys
//! keep their position; new keys are appended in batch order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// How a key collision between a local and a remote record is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The remote record always replaces the local one.
    #[default]
    RemoteWins,
    /// The remote record replaces the local one unless the local record
    /// carries a strictly newer `updatedAt`.
    NewestWins,
}

impl ConflictPolicy {
    fn remote_wins(self, local: &Quote, remote: &Quote) -> bool {
        match self {
            Self::RemoteWins => true,
            Self::NewestWins => match (local.updated_at, remote.updated_at) {
                (Some(local_at), Some(remote_at)) => remote_at >= local_at,
                (None, _) => true,
                (Some(_), None) => false,
            },
        }
    }
}

/// Counters describing one merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Records in the remote batch.
    pub fetched: usize,
    /// Remote records whose key already existed locally.
    pub conflicts: usize,
    /// Remote records with a key not seen before.
    pub added: usize,
    /// Size of the merged collection.
    pub total: usize,
}

impl MergeOutcome {
    pub fn has_conflict(&self) -> bool {
        self.conflicts > 0
    }
}

struct Slot {
    quote: Quote,
    local: bool,
    conflicted: bool,
}

/// Merge `remote` into `local`.
///
/// Local duplicates collapse onto the first position with the last record
/// winning, as do duplicates inside the remote batch. Only a collision with
/// a key that came from `local` counts as a conflict.
pub fn merge(local: Vec<Quote>, remote: Vec<Quote>, policy: ConflictPolicy) -> (Vec<Quote>, MergeOutcome) {
    let mut outcome = MergeOutcome {
        fetched: remote.len(),
        ..MergeOutcome::default()
    };
    let mut index: HashMap<String, usize> = HashMap::with_capacity(local.len() + remote.len());
    let mut slots: Vec<Slot> = Vec::with_capacity(local.len() + remote.len());

    for quote in local {
        match index.get(quote.key()).copied() {
            Some(at) => slots[at].quote = quote,
            None => {
                index.insert(quote.key().to_string(), slots.len());
                slots.push(Slot {
                    quote,
                    local: true,
                    conflicted: false,
                });
            }
        }
    }

    for quote in remote {
        match index.get(quote.key()).copied() {
            Some(at) => {
                let slot = &mut slots[at];
                if slot.local {
                    // A local key conflicts once however often the batch repeats it
                    if !slot.conflicted {
                        slot.conflicted = true;
                        outcome.conflicts += 1;
                    }
                    if policy.remote_wins(&slot.quote, &quote) {
                        slot.quote = quote;
                    }
                } else {
                    slot.quote = quote;
                }
            }
            None => {
                index.insert(quote.key().to_string(), slots.len());
                slots.push(Slot {
                    quote,
                    local: false,
                    conflicted: false,
                });
                outcome.added += 1;
            }
        }
    }

    let merged: Vec<Quote> = slots.into_iter().map(|slot| slot.quote).collect();
    outcome.total = merged.len();
    (merged, outcome)
}

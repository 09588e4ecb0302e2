use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncNoticeIntent {
    /// A reconciliation overwrote `conflicts` local quotes.
    ConflictDetected { conflicts: usize },
    /// User dismissed the banner.
    Acknowledge,
    /// A later reconciliation finished without conflicts.
    CleanSync,
}

impl Intent for SyncNoticeIntent {}

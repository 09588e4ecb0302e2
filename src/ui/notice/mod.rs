mod intent;
mod reducer;
mod state;

pub use intent::SyncNoticeIntent;
pub use reducer::SyncNoticeReducer;
pub use state::SyncNoticeState;

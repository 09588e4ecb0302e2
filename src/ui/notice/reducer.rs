use crate::ui::mvi::Reducer;
use crate::ui::notice::intent::SyncNoticeIntent;
use crate::ui::notice::state::SyncNoticeState;

pub struct SyncNoticeReducer;

impl Reducer for SyncNoticeReducer {
    type State = SyncNoticeState;
    type Intent = SyncNoticeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SyncNoticeIntent::ConflictDetected { conflicts: 0 } => state,
            SyncNoticeIntent::ConflictDetected { conflicts } => {
                SyncNoticeState::Visible { conflicts }
            }
            SyncNoticeIntent::Acknowledge | SyncNoticeIntent::CleanSync => {
                SyncNoticeState::Hidden
            }
        }
    }
}

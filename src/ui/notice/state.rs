use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncNoticeState {
    #[default]
    Hidden,
    Visible { conflicts: usize },
}

impl UiState for SyncNoticeState {}

impl SyncNoticeState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Banner text, `None` while hidden.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Visible { conflicts: 1 } => {
                Some("Quotes synced with server. 1 conflict was resolved.".to_string())
            }
            Self::Visible { conflicts } => Some(format!(
                "Quotes synced with server. {conflicts} conflicts were resolved."
            )),
        }
    }
}

use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Category,
}

/// The add-quote form. Submission happens outside the reducer; a
/// successful submit closes the form, a rejected one leaves it open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddFormState {
    #[default]
    Hidden,
    Editing {
        text: String,
        category: String,
        field: FormField,
    },
}

impl UiState for AddFormState {}

impl AddFormState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Current `(text, category)` input, `None` while hidden.
    pub fn values(&self) -> Option<(&str, &str)> {
        match self {
            Self::Hidden => None,
            Self::Editing { text, category, .. } => Some((text.as_str(), category.as_str())),
        }
    }
}

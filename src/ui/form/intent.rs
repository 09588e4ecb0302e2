use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFormIntent {
    Open,
    Close,
    Insert(char),
    Backspace,
    /// Tab / Shift+Tab: toggle between the two fields.
    SwitchField,
}

impl Intent for AddFormIntent {}

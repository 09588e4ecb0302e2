use crate::ui::form::intent::AddFormIntent;
use crate::ui::form::state::{AddFormState, FormField};
use crate::ui::mvi::Reducer;

pub struct AddFormReducer;

impl Reducer for AddFormReducer {
    type State = AddFormState;
    type Intent = AddFormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AddFormIntent::Open => match state {
                // Reopening keeps whatever was typed
                visible @ AddFormState::Editing { .. } => visible,
                AddFormState::Hidden => AddFormState::Editing {
                    text: String::new(),
                    category: String::new(),
                    field: FormField::Text,
                },
            },
            AddFormIntent::Close => AddFormState::Hidden,
            AddFormIntent::Insert(ch) => match state {
                AddFormState::Editing {
                    mut text,
                    mut category,
                    field,
                } => {
                    match field {
                        FormField::Text => text.push(ch),
                        FormField::Category => category.push(ch),
                    }
                    AddFormState::Editing {
                        text,
                        category,
                        field,
                    }
                }
                other => other,
            },
            AddFormIntent::Backspace => match state {
                AddFormState::Editing {
                    mut text,
                    mut category,
                    field,
                } => {
                    match field {
                        FormField::Text => text.pop(),
                        FormField::Category => category.pop(),
                    };
                    AddFormState::Editing {
                        text,
                        category,
                        field,
                    }
                }
                other => other,
            },
            AddFormIntent::SwitchField => match state {
                AddFormState::Editing {
                    text,
                    category,
                    field,
                } => AddFormState::Editing {
                    text,
                    category,
                    field: match field {
                        FormField::Text => FormField::Category,
                        FormField::Category => FormField::Text,
                    },
                },
                other => other,
            },
        }
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;
use crate::ui::form::AddFormIntent;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.form().is_visible() {
        let intent = match key.code {
            KeyCode::Esc => AddFormIntent::Close,
            KeyCode::Tab | KeyCode::BackTab => AddFormIntent::SwitchField,
            KeyCode::Backspace => AddFormIntent::Backspace,
            KeyCode::Enter => {
                app.submit_form();
                return;
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                AddFormIntent::Insert(ch)
            }
            _ => return,
        };
        app.dispatch_form(intent);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Left | KeyCode::Char('[') => app.cycle_category(-1),
        KeyCode::Right | KeyCode::Char(']') => app.cycle_category(1),
        KeyCode::Char('r') | KeyCode::Char(' ') => app.show_random(),
        KeyCode::Char('a') => app.dispatch_form(AddFormIntent::Open),
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('s') => app.request_sync(),
        KeyCode::Char('x') | KeyCode::Esc => app.acknowledge_notice(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

mod common;

use common::{make_app, read_only_session, seeded_app, seeded_session, sync_config};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quotebook::filter::CategoryFilter;
use quotebook::quote::Quote;
use quotebook::render::{EMPTY_LIST, NO_QUOTE};
use quotebook::sync::SyncError;
use quotebook::ui::app::{App, StatusKind, SyncIndicator, UiCommand};
use quotebook::ui::input::handle_key;
use quotebook::ui::render::draw;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tempfile::TempDir;

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let symbols: Vec<&str> = buffer.content().iter().map(|cell| cell.symbol()).collect();
    symbols
        .chunks(width)
        .map(|row| row.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn quit_keys() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());

    let mut app = seeded_app();
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.should_quit());
}

#[test]
fn arrows_cycle_categories_and_wrap() {
    let mut app = seeded_app();
    assert_eq!(app.selected_category_index(), 0);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.session().filter(), &CategoryFilter::parse("Technology"));
    assert_eq!(app.session().visible().len(), 1);

    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.session().filter(), &CategoryFilter::parse("Motivation"));

    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.session().filter(), &CategoryFilter::All);
}

#[test]
fn add_form_submits_and_queues_publish() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Char('a'));
    assert!(app.form().is_visible());

    // 'q' is text while the form is open
    type_text(&mut app, "quiet idea");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Ideas");
    press(&mut app, KeyCode::Enter);

    assert!(!app.should_quit());
    assert!(!app.form().is_visible());
    assert_eq!(app.session().quotes().len(), 4);
    assert_eq!(
        app.session().categories(),
        ["Technology", "Life", "Motivation", "Ideas"]
    );

    let commands = app.take_commands();
    assert_eq!(commands.len(), 1);
    let UiCommand::Publish(quote) = &commands[0] else {
        panic!("expected publish, got {commands:?}");
    };
    assert_eq!(quote.text, "quiet idea");
    assert!(app.take_commands().is_empty());
}

#[test]
fn add_form_without_posting() {
    let mut sync = sync_config("http://127.0.0.1:9/posts");
    sync.post_new_quotes = false;
    let mut app = App::new(seeded_session(), sync, std::env::temp_dir().join("unused.json"));
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "x");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "y");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session().quotes().len(), 4);
    assert!(app.take_commands().is_empty());
}

#[test]
fn unsaved_submit_reports_error_without_publishing() {
    let sync = sync_config("http://127.0.0.1:9/posts");
    let mut app = App::new(read_only_session(), sync, std::env::temp_dir().join("unused.json"));
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "lost idea");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Ideas");
    press(&mut app, KeyCode::Enter);

    assert!(!app.form().is_visible());
    assert_eq!(app.status().unwrap().kind, StatusKind::Error);
    assert_eq!(app.session().quotes().len(), 3);
    assert!(!app.session().categories().contains(&"Ideas".to_string()));
    assert!(app.take_commands().is_empty());
}

#[test]
fn invalid_submit_keeps_form_open() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "text only");
    press(&mut app, KeyCode::Enter);

    assert!(app.form().is_visible());
    let status = app.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Please enter a category for the quote.");
    assert_eq!(app.session().quotes().len(), 3);

    press(&mut app, KeyCode::Esc);
    assert!(!app.form().is_visible());
}

#[test]
fn random_key_sets_spotlight() {
    let mut app = seeded_app();
    assert!(app.spotlight().is_none());
    press(&mut app, KeyCode::Char('r'));
    assert!(app.spotlight().is_some());
}

#[test]
fn sync_key_queues_fetch() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.sync_indicator(), &SyncIndicator::InFlight);
    assert_eq!(app.take_commands(), vec![UiCommand::SyncNow]);
}

#[test]
fn conflicting_sync_shows_notice_until_dismissed() {
    let mut app = seeded_app();
    app.on_sync_result(Ok(vec![
        Quote::new("Do or do not. There is no try.", "Server"),
        Quote::new("fresh", "Server"),
    ]));
    assert!(matches!(app.sync_indicator(), SyncIndicator::Synced { .. }));
    assert!(app.notice().is_visible());
    assert_eq!(app.session().quotes().len(), 4);

    press(&mut app, KeyCode::Char('x'));
    assert!(!app.notice().is_visible());
}

#[test]
fn clean_sync_hides_notice() {
    let mut app = seeded_app();
    app.on_sync_result(Ok(vec![Quote::new(
        "Do or do not. There is no try.",
        "Server",
    )]));
    assert!(app.notice().is_visible());
    app.on_sync_result(Ok(vec![Quote::new("brand new", "Server")]));
    assert!(!app.notice().is_visible());
}

#[test]
fn failed_sync_keeps_collection() {
    let mut app = seeded_app();
    app.on_sync_result(Err(SyncError::Status {
        endpoint: "http://example.test/posts".to_string(),
        status: 500,
    }));
    assert!(matches!(app.sync_indicator(), SyncIndicator::Failed { .. }));
    assert_eq!(app.status().unwrap().kind, StatusKind::Error);
    assert_eq!(app.session().quotes().len(), 3);
    assert!(!app.notice().is_visible());
}

#[test]
fn export_writes_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quotes.json");
    let mut app = App::new(seeded_session(), sync_config("http://127.0.0.1:9/posts"), path.clone());
    press(&mut app, KeyCode::Char('e'));

    assert_eq!(app.status().unwrap().kind, StatusKind::Info);
    let exported: Vec<Quote> = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(exported, app.session().quotes());
}

#[test]
fn renders_quotes_and_selector() {
    let app = seeded_app();
    let screen = screen(&app);
    assert!(screen.contains("All Categories"));
    assert!(screen.contains("Do or do not. There is no try."));
    assert!(screen.contains(NO_QUOTE));
}

#[test]
fn renders_placeholder_for_empty_view() {
    let app = make_app(&[]);
    assert!(screen(&app).contains(EMPTY_LIST));
}

#[test]
fn renders_notice_banner() {
    let mut app = seeded_app();
    app.on_sync_result(Ok(vec![Quote::new(
        "Do or do not. There is no try.",
        "Server",
    )]));
    assert!(screen(&app).contains("1 conflict was resolved."));
}

#[test]
fn renders_add_form() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "typed text");
    let screen = screen(&app);
    assert!(screen.contains("Add quote"));
    assert!(screen.contains("typed text"));
}

use crate::ui::app::SyncIndicator;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, filter: &str, count: usize, sync: &SyncIndicator) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (sync_text, sync_color) = match sync {
            SyncIndicator::Idle => ("waiting for first sync".to_string(), HEADER_SEPARATOR),
            SyncIndicator::InFlight => ("syncing…".to_string(), STATUS_WARN),
            SyncIndicator::Synced { at } => (format!("synced {}", at.format("%H:%M:%S")), STATUS_OK),
            SyncIndicator::Failed { .. } => ("sync failed".to_string(), STATUS_ERROR),
        };

        let line = Line::from(vec![
            Span::styled("  Quotebook", Style::default().fg(ACCENT)),
            Span::styled("  │  ", separator_style),
            Span::styled(filter.to_string(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("{count} shown"), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(sync_text, Style::default().fg(sync_color)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

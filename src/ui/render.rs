use crate::render::{list_lines, single_line};
use crate::ui::app::{App, StatusKind};
use crate::ui::footer::Footer;
use crate::ui::form::{AddFormState, FormField};
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let regions = layout_regions(area, app.notice().is_visible());
    let session = app.session();
    let visible = session.visible();

    frame.render_widget(
        Header::new().widget(session.filter().label(), visible.len(), app.sync_indicator()),
        regions.header,
    );

    let options = app.category_options();
    let titles: Vec<Line> = options
        .iter()
        .map(|option| Line::from(option.label.clone()))
        .collect();
    let selector = Tabs::new(titles)
        .select(app.selected_category_index())
        .style(Style::default().fg(HEADER_TEXT))
        .highlight_style(
            Style::default()
                .fg(ACCENT)
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .block(panel("Category"));
    frame.render_widget(selector, regions.selector);

    if let Some(message) = app.notice().message() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(message, Style::default().fg(STATUS_WARN)),
            Span::styled("  (x to dismiss)", Style::default().add_modifier(Modifier::DIM)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(STATUS_WARN)),
        );
        frame.render_widget(banner, regions.notice);
    }

    let items: Vec<ListItem> = list_lines(&visible).into_iter().map(ListItem::new).collect();
    frame.render_widget(List::new(items).block(panel("Quotes")), regions.list);

    let spotlight = Paragraph::new(single_line(app.spotlight()))
        .wrap(Wrap { trim: true })
        .block(panel("Random quote"));
    frame.render_widget(spotlight, regions.spotlight);

    if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => STATUS_OK,
            StatusKind::Error => STATUS_ERROR,
        };
        frame.render_widget(
            Paragraph::new(format!(" {}", status.text)).style(Style::default().fg(color)),
            regions.status,
        );
    }

    frame.render_widget(
        Footer::new().widget(regions.footer, app.form().is_visible()),
        regions.footer,
    );

    if let AddFormState::Editing {
        text,
        category,
        field,
    } = app.form()
    {
        draw_form(frame, text, category, *field);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(HEADER_TEXT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn draw_form(frame: &mut Frame<'_>, text: &str, category: &str, field: FormField) {
    let row = |label: &str, value: &str, focused: bool| {
        let marker = if focused { "▸ " } else { "  " };
        let style = if focused {
            Style::default().fg(ACCENT).bg(ACTIVE_HIGHLIGHT)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<9}"), style),
            Span::styled(value.to_string(), style),
        ])
    };
    let lines = vec![
        row("Quote", text, field == FormField::Text),
        Line::from(""),
        row("Category", category, field == FormField::Category),
    ];

    let area = centered_rect_by_size(frame.area(), 64, lines.len() as u16 + 2);
    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled("Add quote", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}

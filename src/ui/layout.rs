use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
pub struct Regions {
    pub header: Rect,
    pub selector: Rect,
    pub notice: Rect,
    pub list: Rect,
    pub spotlight: Rect,
    pub status: Rect,
    pub footer: Rect,
}

/// Split `area`; the notice region collapses to zero height when hidden.
pub fn layout_regions(area: Rect, notice_visible: bool) -> Regions {
    let notice_height = if notice_visible { 3 } else { 0 };
    let [header, selector, notice, list, spotlight, status, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(notice_height),
        Constraint::Min(3),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    Regions {
        header,
        selector,
        notice,
        list,
        spotlight,
        status,
        footer,
    }
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

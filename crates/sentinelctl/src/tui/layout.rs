//! Layout - Console grid computation
//!
//! Header, section tabs, body with an optional activity feed column,
//! and a status bar. The feed column is dropped first on narrow terminals.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLayout {
    pub header: Rect,
    pub tabs: Rect,
    /// Active section content
    pub body: Rect,
    /// Activity feed column; zero width when the terminal is narrow
    pub feed: Rect,
    pub status_bar: Rect,
}

const HEADER_HEIGHT: u16 = 1;
const TABS_HEIGHT: u16 = 3;
const STATUS_BAR_HEIGHT: u16 = 1;
const MIN_BODY_WIDTH: u16 = 60;
const FEED_WIDTH: u16 = 38;

/// Width and height of the detail overlay, in percent of the frame
const MODAL_PERCENT_X: u16 = 70;
const MODAL_PERCENT_Y: u16 = 70;

pub fn compute_layout(frame_area: Rect) -> ConsoleLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    let content = rows[2];
    let show_feed = content.width >= MIN_BODY_WIDTH + FEED_WIDTH;

    let (body, feed) = if show_feed {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(MIN_BODY_WIDTH), Constraint::Length(FEED_WIDTH)])
            .split(content);
        (columns[0], columns[1])
    } else {
        (content, Rect::new(content.x, content.y, 0, 0))
    };

    ConsoleLayout {
        header: rows[0],
        tabs: rows[1],
        body,
        feed,
        status_bar: rows[3],
    }
}

/// Area of the detail overlay for a given frame
pub fn modal_area(frame_area: Rect) -> Rect {
    centered_rect(MODAL_PERCENT_X, MODAL_PERCENT_Y, frame_area)
}

/// Create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Whether a terminal cell lies inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

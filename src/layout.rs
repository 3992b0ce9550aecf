//! Layout helpers.

use ratatui::prelude::*;

use crate::status::ResourceKind;

/// The three stacked regions of every screen.
pub struct MainLayout {
    /// Sliders + preview panel.
    pub body: Rect,
    /// HELP bar.
    pub help_bar: Rect,
    /// STATUS bar.
    pub status_bar: Rect,
}

/// The body split into the form and the side panel.
pub struct BodyLayout {
    /// Slider column.
    pub form: Rect,
    /// Payload preview and log.
    pub side_panel: Rect,
}

/// Height of one slider gauge including its border.
const SLIDER_HEIGHT: u16 = 3;

/// Split the screen into body, HELP and STATUS.
pub fn create_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // body
            Constraint::Length(3), // HELP
            Constraint::Length(3), // STATUS
        ])
        .split(area);

    MainLayout {
        body: chunks[0],
        help_bar: chunks[1],
        status_bar: chunks[2],
    }
}

/// Split the body into the form (60%) and the side panel (40%).
pub fn create_body_layout(area: Rect) -> BodyLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    BodyLayout {
        form: chunks[0],
        side_panel: chunks[1],
    }
}

/// One row per slider, top-aligned; leftover space stays at the bottom.
pub fn create_slider_rows(area: Rect) -> Vec<Rect> {
    let mut constraints = vec![Constraint::Length(SLIDER_HEIGHT); ResourceKind::ALL.len()];
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    chunks[..ResourceKind::ALL.len()].to_vec()
}

/// Centered popup of `width_percent` width and fixed `height`.
pub fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup_layout[1])[1]
}

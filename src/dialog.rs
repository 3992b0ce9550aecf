//! Confirmation and failure popups shown after a submit.

use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::layout::centered_popup;

/// What the dialog reports and which actions it offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogKind {
    /// Delivery succeeded; OK closes it.
    Sent,
    /// Delivery failed; the user may retry or dismiss.
    SendFailed { error: String },
}

/// Open dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogState {
    pub kind: DialogKind,
}

impl DialogState {
    pub fn sent() -> Self {
        Self {
            kind: DialogKind::Sent,
        }
    }

    pub fn send_failed(error: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::SendFailed {
                error: error.into(),
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Sent => "Status Update Sent",
            DialogKind::SendFailed { .. } => "Status Update Failed",
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DialogKind::Sent => "Shelter status has been sent to rescue center.".into(),
            DialogKind::SendFailed { error } => {
                format!("Could not send shelter status to rescue center.\n\n{error}")
            }
        }
    }

    /// True when a retry is offered.
    pub fn can_retry(&self) -> bool {
        matches!(self.kind, DialogKind::SendFailed { .. })
    }
}

/// Draw the dialog as a popup. `help` lists the active keys.
pub fn render_dialog(f: &mut Frame, state: &DialogState, help: &str) {
    let popup_area = centered_popup(f.area(), 60, 9);
    f.render_widget(Clear, popup_area);

    let border = if state.can_retry() {
        Color::Red
    } else {
        Color::Green
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(state.title())
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::DarkGray));
    f.render_widget(block, popup_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(popup_area);

    let message = Paragraph::new(state.message()).wrap(Wrap { trim: true });
    f.render_widget(message, inner[0]);

    let help = Paragraph::new(help.to_string())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, inner[1]);
}

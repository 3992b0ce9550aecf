//! UI state shared with the renderer and the screen kinds.

use std::collections::VecDeque;

/// Number of log lines kept for the side panel.
pub const LOG_LINES: usize = 6;

/// Screen currently shown in the TUI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The four-slider reporting form.
    Form,
    /// Backend settings editor.
    Settings,
}

/// UI state shared with rendering.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Current screen.
    pub screen: Screen,
    /// Most recent messages shown in the side panel, oldest first.
    pub log: VecDeque<String>,
    /// Status bar text.
    pub status: String,
    /// Highlighted error message.
    pub error: Option<String>,
}

impl UiState {
    /// Start on the given screen with an idle status.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            log: VecDeque::with_capacity(LOG_LINES),
            status: "Ready".into(),
            error: None,
        }
    }

    /// Append a log line, dropping the oldest once the panel is full.
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
        while self.log.len() > LOG_LINES {
            self.log.pop_front();
        }
    }
}

//! Single-line text input popup (InputBox).

use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{layout::centered_popup, status::ResourceKind};

/// InputBox state.
#[derive(Clone, Debug)]
pub struct InputBoxState {
    /// Prompt shown above the field.
    pub prompt: String,
    /// Current value.
    pub value: String,
    /// Cursor position in characters.
    pub cursor: usize,
    /// What to do with the value on confirm.
    pub callback_id: InputCallbackId,
    /// Render the value as `*` (auth token).
    pub masked: bool,
}

/// Target of a confirmed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputCallbackId {
    // Settings screen
    SettingsBaseUrl,
    SettingsShelterId,
    SettingsAuthToken,

    // Form screen: type an exact slider value
    SliderValue(ResourceKind),
}

impl InputBoxState {
    /// Open with `value` prefilled and the cursor at its end.
    pub fn new(prompt: impl Into<String>, value: String, callback_id: InputCallbackId) -> Self {
        let cursor = value.chars().count();
        Self {
            prompt: prompt.into(),
            value,
            cursor,
            callback_id,
            masked: false,
        }
    }

    /// Hide the typed characters.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Byte offset of a character index.
    fn byte_at(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_at(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_at(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Clear the whole line.
    pub fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text to display with a `|` at the cursor, scrolled to fit `width`.
    fn visible_text(&self, width: usize) -> String {
        let chars: Vec<char> = if self.masked {
            vec!['*'; self.value.chars().count()]
        } else {
            self.value.chars().collect()
        };
        // Keep the cursor inside the visible window.
        let scroll = self.cursor.saturating_sub(width.saturating_sub(2));
        let before: String = chars[scroll..self.cursor].iter().collect();
        let after: String = chars[self.cursor..]
            .iter()
            .take(width.saturating_sub(before.chars().count() + 1))
            .collect();
        format!("{before}|{after}")
    }
}

/// Draw the InputBox as a popup.
pub fn render_input_box(f: &mut Frame, state: &InputBoxState) {
    let popup_area = centered_popup(f.area(), 70, 7);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Input")
        .style(Style::default().bg(Color::DarkGray));
    f.render_widget(block, popup_area);

    let inner_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1), // field
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
        ])
        .split(popup_area);

    let prompt_widget = Paragraph::new(state.prompt.clone()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(prompt_widget, inner_layout[0]);

    let text = state.visible_text(inner_layout[1].width as usize);
    let input_widget = Paragraph::new(text).style(Style::default().fg(Color::Green));
    f.render_widget(input_widget, inner_layout[1]);

    let help = Paragraph::new("Enter=confirm | Esc=cancel | Ctrl+U=clear")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, inner_layout[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(value: &str) -> InputBoxState {
        InputBoxState::new("p", value.into(), InputCallbackId::SettingsShelterId)
    }

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut s = boxed("shelr");
        s.move_left();
        s.insert_char('t');
        assert_eq!(s.value, "sheltr");
        s.move_end();
        s.backspace();
        assert_eq!(s.value, "shelt");
        assert_eq!(s.cursor, 5);
    }

    #[test]
    fn test_delete_and_home() {
        let mut s = boxed("x42");
        s.move_home();
        s.delete();
        assert_eq!(s.value, "42");
        assert_eq!(s.cursor, 0);
        // Deleting at the end is a no-op.
        s.move_end();
        s.delete();
        assert_eq!(s.value, "42");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut s = boxed("避難所");
        s.move_left();
        s.backspace();
        assert_eq!(s.value, "避所");
        s.insert_char('x');
        assert_eq!(s.value, "避x所");
    }

    #[test]
    fn test_masked_visible_text() {
        let s = boxed("secret").masked();
        assert_eq!(s.visible_text(20), "******|");
    }

    #[test]
    fn test_visible_text_scrolls_to_cursor() {
        let s = boxed("abcdefghij");
        assert_eq!(s.visible_text(6), "ghij|");
        let mut s = s;
        s.move_home();
        assert_eq!(s.visible_text(6), "|abcde");
    }
}

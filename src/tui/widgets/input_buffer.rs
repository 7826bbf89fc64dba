//! Single-line text field with cursor management.
//!
//! Used for the template-name, import-path and send-at fields. Multi-line
//! message editing goes through `ratatui_textarea` instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::tui::theme;

/// A single-line input buffer. The cursor is a byte offset on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let content = text.into();
        Self {
            cursor: content.len(),
            content,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.content.len())
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Apply an editing key. Returns `true` if the buffer handled it.
    ///
    /// Enter and Esc are left to the caller.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only counts as empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Render as a one-line field. A block cursor is drawn when `focused`;
    /// `placeholder` shows in dim text while the buffer is empty.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block<'_>,
        placeholder: &str,
        focused: bool,
    ) {
        let line = if self.content.is_empty() && !focused {
            Line::from(Span::styled(placeholder.to_string(), theme::dim()))
        } else if focused {
            let (before, rest) = self.content.split_at(self.cursor);
            let mut chars = rest.chars();
            let at = chars.next().map(String::from).unwrap_or_else(|| " ".into());
            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(at, Style::default().bg(theme::PRIMARY_LIGHT).fg(theme::BG_BASE)),
                Span::raw(chars.as_str().to_string()),
            ])
        } else {
            Line::from(Span::raw(self.content.clone()))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = InputBuffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = InputBuffer::with_text("café");
        buf.backspace();
        assert_eq!(buf.text(), "caf");
        buf.insert_char('é');
        buf.move_left();
        buf.move_left();
        buf.delete();
        assert_eq!(buf.text(), "caé");
    }

    #[test]
    fn test_handle_key_ignores_enter_and_ctrl() {
        let mut buf = InputBuffer::new();
        assert!(buf.handle_key(&key(KeyCode::Char('a'))));
        assert!(!buf.handle_key(&key(KeyCode::Enter)));
        assert!(!buf.handle_key(&key(KeyCode::Esc)));
        assert!(!buf.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_movement_bounds() {
        let mut buf = InputBuffer::with_text("ab");
        buf.move_right();
        assert_eq!(buf.cursor_position(), 2);
        buf.move_home();
        buf.move_left();
        assert_eq!(buf.cursor_position(), 0);
        buf.move_end();
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_take_resets() {
        let mut buf = InputBuffer::with_text("x");
        assert_eq!(buf.take(), "x");
        assert!(buf.text().is_empty());
        assert_eq!(buf.cursor_position(), 0);
    }

    #[test]
    fn test_is_empty_trims() {
        let mut buf = InputBuffer::new();
        buf.insert_char(' ');
        assert!(buf.is_empty());
        buf.insert_char('a');
        assert!(!buf.is_empty());
    }
}

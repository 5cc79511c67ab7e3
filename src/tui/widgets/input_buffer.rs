//! Single-line text input with cursor management.
//!
//! Shared by the search bar, the command palette and the subscribe form.

use crossterm::event::KeyCode;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Outcome of feeding one key to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    /// Text changed; callers re-run whatever depends on it.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Not an editing key.
    Ignored,
}

#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    /// Byte offset into `content`, always on a char boundary.
    cursor: usize,
    /// Maximum length in chars; `None` is unbounded.
    max_chars: Option<usize>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.content.clear();
        self.cursor = 0;
        for c in text.chars() {
            if !self.insert_char(c) {
                break;
            }
        }
    }

    /// Returns false when the length limit is reached.
    pub fn insert_char(&mut self, c: char) -> bool {
        if let Some(max) = self.max_chars {
            if self.content.chars().count() >= max {
                return false;
            }
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.content.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        let next = self.next_boundary();
        self.content.drain(self.cursor..next);
        true
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

    /// Apply a standard editing key.
    pub fn handle_key(&mut self, code: KeyCode) -> InputEdit {
        let changed = match code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                return InputEdit::Moved;
            }
            KeyCode::Right => {
                self.move_right();
                return InputEdit::Moved;
            }
            KeyCode::Home => {
                self.move_home();
                return InputEdit::Moved;
            }
            KeyCode::End => {
                self.move_end();
                return InputEdit::Moved;
            }
            _ => return InputEdit::Ignored,
        };
        if changed {
            InputEdit::Changed
        } else {
            InputEdit::Moved
        }
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

    /// Spans for the content with the char under the cursor drawn in `cursor_style`.
    /// An empty buffer shows `placeholder` in `placeholder_style` instead.
    pub fn spans(
        &self,
        text_style: Style,
        cursor_style: Style,
        placeholder: &str,
        placeholder_style: Style,
    ) -> Vec<Span<'static>> {
        if self.content.is_empty() {
            return vec![
                Span::styled(" ", cursor_style),
                Span::styled(placeholder.to_string(), placeholder_style),
            ];
        }

        let before = &self.content[..self.cursor];
        let (at, after) = match self.content[self.cursor..].chars().next() {
            Some(c) => (
                c.to_string(),
                &self.content[self.cursor + c.len_utf8()..],
            ),
            None => (" ".to_string(), ""),
        };

        vec![
            Span::styled(before.to_string(), text_style),
            Span::styled(at, cursor_style),
            Span::styled(after.to_string(), text_style),
        ]
    }

    /// Convenience for a prefixed single-line field.
    pub fn line(
        &self,
        prefix: Span<'static>,
        text_style: Style,
        cursor_style: Style,
        placeholder: &str,
        placeholder_style: Style,
    ) -> Line<'static> {
        let mut spans = vec![prefix];
        spans.extend(self.spans(text_style, cursor_style, placeholder, placeholder_style));
        Line::from(spans)
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
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }
}

//! Single-line text input component.
//!
//! Used for the delivery search field and the row count field. The input
//! only edits text; callers decide what a change means.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position within the value, in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
    /// Accept only ASCII digits.
    numeric: bool,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input that accepts only digits.
    pub fn numeric() -> Self {
        Self {
            numeric: true,
            ..Self::default()
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if self.numeric && !c.is_ascii_digit() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.value.chars().count() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.chars().count();
                false
            }
            _ => false,
        }
    }

    /// Render the input as `label: value` on a single line.
    pub fn render_inline(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();
        let label_style = if focused {
            Style::default().fg(t.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.dim)
        };

        let value_span = if self.value.is_empty() && !focused {
            Span::styled(self.placeholder.clone(), Style::default().fg(t.dim))
        } else if focused {
            Span::styled(self.value.clone(), Style::default().fg(t.warning))
        } else {
            Span::styled(self.value.clone(), Style::default().fg(t.fg))
        };

        let prefix = format!("{}: ", label);
        let prefix_width = prefix.chars().count() as u16;
        let line = Line::from(vec![Span::styled(prefix, label_style), value_span]);
        frame.render_widget(Paragraph::new(line), area);

        if focused {
            let cursor_x = area.x + prefix_width + self.cursor as u16;
            if cursor_x < area.x + area.width {
                frame.set_cursor_position(Position::new(cursor_x, area.y));
            }
        }
    }
}

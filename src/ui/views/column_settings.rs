//! Column settings dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::events::KeyBindings;
use crate::table::{ColumnField, MoveDirection, TableController};
use crate::ui::components::centered_rect;
use crate::ui::theme::theme;

/// Actions that can be returned from the column settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSettingsAction {
    /// Show or hide a column.
    Toggle(ColumnField),
    /// Move the column at `index` one step.
    Move {
        index: usize,
        direction: MoveDirection,
    },
    Close,
}

/// Checkbox list of the delivery table columns.
#[derive(Debug, Default)]
pub struct ColumnSettingsView {
    cursor: usize,
    list_state: ListState,
}

impl ColumnSettingsView {
    /// Create a new column settings view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the focused column index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Focus a column, typically the new index of a column that just moved.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Handle keyboard input.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        bindings: &KeyBindings,
        table: &TableController,
    ) -> Option<ColumnSettingsAction> {
        let columns = table.columns();
        if bindings.is_move_up(&key) {
            return Some(ColumnSettingsAction::Move {
                index: self.cursor,
                direction: MoveDirection::Up,
            });
        }
        if bindings.is_move_down(&key) {
            return Some(ColumnSettingsAction::Move {
                index: self.cursor,
                direction: MoveDirection::Down,
            });
        }
        if bindings.is_down(&key) {
            if self.cursor + 1 < columns.len() {
                self.cursor += 1;
            }
            return None;
        }
        if bindings.is_up(&key) {
            self.cursor = self.cursor.saturating_sub(1);
            return None;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => columns
                .get(self.cursor)
                .map(|c| ColumnSettingsAction::Toggle(c.field)),
            KeyCode::Esc | KeyCode::Char('q') => Some(ColumnSettingsAction::Close),
            _ => None,
        }
    }

    /// Render the dialog centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, table: &TableController) {
        let t = theme();
        let columns = table.columns();
        let dialog = centered_rect(area, 40, columns.len() as u16 + 2);
        frame.render_widget(Clear, dialog);

        let last = columns.len().saturating_sub(1);
        let enabled = Style::default().fg(t.accent);
        let disabled = Style::default().fg(t.dim).add_modifier(Modifier::DIM);

        let items: Vec<ListItem> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let check = if column.visible { "[x] " } else { "[ ] " };
                let label_style = if column.visible {
                    Style::default().fg(t.fg)
                } else {
                    Style::default().fg(t.dim)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(check, Style::default().fg(t.success)),
                    Span::styled(format!("{:<12}", column.header), label_style),
                    Span::styled(" ↑", if i == 0 { disabled } else { enabled }),
                    Span::styled(" ↓", if i == last { disabled } else { enabled }),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Column Settings ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.accent)),
            )
            .highlight_style(Style::default().bg(t.highlight).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        self.cursor = self.cursor.min(last);
        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, dialog, &mut self.list_state);
    }
}

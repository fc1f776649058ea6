//! Row settings dialog for reordering deliveries.
//!
//! Each row has an order field. Typing a number stages a new position; the
//! position is committed when focus leaves the field or Enter is pressed, and
//! nothing reaches the delivery list until Apply.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::events::KeyBindings;
use crate::table::TableController;
use crate::ui::components::centered_percent;
use crate::ui::theme::theme;

use super::deliveries::{column_width, delivery_cell};

/// Actions that can be returned from the row settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSettingsAction {
    /// Type a character into a row's order field.
    Type { row: usize, c: char },
    /// Erase the last character of a row's order field.
    Erase { row: usize },
    /// Commit a row's order field.
    Commit { row: usize },
    Apply,
    Cancel,
}

/// The row settings dialog.
#[derive(Debug, Default)]
pub struct RowSettingsView {
    /// Focused order field.
    cursor: usize,
    table_state: TableState,
}

impl RowSettingsView {
    /// Create a new row settings view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the first row.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Get the focused row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle keyboard input.
    ///
    /// Moving focus commits the field being left, so the returned action
    /// refers to the previously focused row.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        bindings: &KeyBindings,
        rows: usize,
    ) -> Option<RowSettingsAction> {
        let row = self.cursor;
        let forward = bindings.is_down(&key) || key.code == KeyCode::Tab;
        let backward = bindings.is_up(&key) || key.code == KeyCode::BackTab;
        if forward {
            if self.cursor + 1 < rows {
                self.cursor += 1;
            }
            return Some(RowSettingsAction::Commit { row });
        }
        if backward {
            self.cursor = self.cursor.saturating_sub(1);
            return Some(RowSettingsAction::Commit { row });
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() => {
                Some(RowSettingsAction::Type { row, c })
            }
            (KeyCode::Backspace, _) => Some(RowSettingsAction::Erase { row }),
            (KeyCode::Enter, _) => Some(RowSettingsAction::Commit { row }),
            (KeyCode::Char('a'), KeyModifiers::NONE) => Some(RowSettingsAction::Apply),
            (KeyCode::Esc, _) => Some(RowSettingsAction::Cancel),
            _ => None,
        }
    }

    /// Render the dialog over `area`. Draws nothing when no session is open.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, table: &TableController) {
        let Some(session) = table.staging() else {
            return;
        };
        let t = theme();
        let dialog = centered_percent(area, 70, 70);
        frame.render_widget(Clear, dialog);

        let title = match session.pending_count() {
            0 => " Row Settings ".to_string(),
            n => format!(" Row Settings ({} pending) ", n),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let rows = session.rows();
        if rows.is_empty() {
            self.table_state.select(None);
            frame.render_widget(
                Paragraph::new(Span::styled("No rows to reorder", Style::default().fg(t.dim))),
                chunks[1],
            );
            return;
        }
        let hint = format!(
            "Enter order number (1-{}) to reorder rows. Changes will apply after Apply.",
            rows.len()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(t.dim)))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        let data_columns: Vec<_> = table
            .visible_columns()
            .into_iter()
            .filter(|c| c.field.is_data())
            .collect();

        let header_style = Style::default().fg(t.accent).add_modifier(Modifier::BOLD);
        let header = Row::new(
            std::iter::once(Cell::from("Order").style(header_style)).chain(
                data_columns
                    .iter()
                    .map(|c| Cell::from(c.header).style(header_style)),
            ),
        );

        let mut widths = vec![Constraint::Length(7)];
        widths.extend(data_columns.iter().map(|c| column_width(c.field)));

        let body: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(i, delivery)| {
                let order = match session.pending(i) {
                    Some(text) => Cell::from(Span::styled(
                        text.to_string(),
                        Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
                    )),
                    None => Cell::from(Span::styled(
                        (i + 1).to_string(),
                        Style::default().fg(t.dim),
                    )),
                };
                let cells = std::iter::once(order)
                    .chain(data_columns.iter().map(|c| delivery_cell(delivery, c.field, "")));
                Row::new(cells.collect::<Vec<_>>())
            })
            .collect();

        let widget = Table::new(body, widths)
            .header(header)
            .highlight_style(Style::default().bg(t.highlight))
            .highlight_symbol("> ");

        self.cursor = self.cursor.min(rows.len() - 1);
        self.table_state.select(Some(self.cursor));
        frame.render_stateful_widget(widget, chunks[1], &mut self.table_state);
    }
}

//! Delivery list dialog.
//!
//! Shows the open route's deliveries with a search field, a row count field,
//! and the visible columns in their configured order. The dialog is either
//! centered over the route table or maximized to the whole screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::data::Delivery;
use crate::events::{KeyBindings, KeyContext};
use crate::table::{ColumnField, MoveDirection, TableController};
use crate::ui::components::{centered_percent, highlight_text, TextInput};
use crate::ui::theme::theme;

/// Which part of the dialog receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryFocus {
    #[default]
    Table,
    Search,
    RowCount,
}

/// Actions that can be returned from the delivery list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// The search text changed.
    QueryChanged(String),
    /// The row count field changed.
    RowInputChanged(String),
    /// Add or remove a row.
    StepRows(MoveDirection),
    OpenMenu,
    ToggleFullscreen,
    ColumnSettings,
    RowSettings,
    Close,
}

/// The delivery list dialog.
#[derive(Debug)]
pub struct DeliveryListView {
    search: TextInput,
    row_input: TextInput,
    focus: DeliveryFocus,
    maximized: bool,
    selected: usize,
    table_state: TableState,
}

impl DeliveryListView {
    /// Create a new delivery list view.
    pub fn new() -> Self {
        Self {
            search: TextInput::new().with_placeholder("press / to search"),
            row_input: TextInput::numeric().with_placeholder("1-1000"),
            focus: DeliveryFocus::Table,
            maximized: false,
            selected: 0,
            table_state: TableState::default(),
        }
    }

    /// Reset the dialog for a freshly opened route.
    pub fn reset(&mut self, table: &TableController) {
        self.search.clear();
        self.row_input.set_value(table.row_input());
        self.focus = DeliveryFocus::Table;
        self.selected = 0;
    }

    /// Copy the controller's row count text into the field.
    pub fn sync_row_input(&mut self, table: &TableController) {
        self.row_input.set_value(table.row_input());
    }

    /// Get the focused part of the dialog.
    pub fn focus(&self) -> DeliveryFocus {
        self.focus
    }

    /// Get the hint context for the focused part.
    pub fn key_context(&self) -> KeyContext {
        match self.focus {
            DeliveryFocus::Table => KeyContext::DeliveryList,
            DeliveryFocus::Search => KeyContext::Search,
            DeliveryFocus::RowCount => KeyContext::RowCount,
        }
    }

    /// Check if the dialog covers the whole screen.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Switch between centered and fullscreen layout.
    pub fn toggle_maximized(&mut self) {
        self.maximized = !self.maximized;
    }

    /// Get the selected row of the filtered view.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Handle keyboard input.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        bindings: &KeyBindings,
        table: &TableController,
    ) -> Option<DeliveryAction> {
        match self.focus {
            DeliveryFocus::Search => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.focus = DeliveryFocus::Table;
                    return None;
                }
                if self.search.handle_input(key) {
                    self.selected = 0;
                    return Some(DeliveryAction::QueryChanged(self.search.value().to_string()));
                }
                None
            }
            DeliveryFocus::RowCount => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.focus = DeliveryFocus::Table;
                    return None;
                }
                if self.row_input.handle_input(key) {
                    return Some(DeliveryAction::RowInputChanged(
                        self.row_input.value().to_string(),
                    ));
                }
                None
            }
            DeliveryFocus::Table => self.handle_table_input(key, bindings, table),
        }
    }

    fn handle_table_input(
        &mut self,
        key: KeyEvent,
        bindings: &KeyBindings,
        table: &TableController,
    ) -> Option<DeliveryAction> {
        let rows = table.filtered().len();
        if bindings.is_down(&key) {
            if self.selected + 1 < rows {
                self.selected += 1;
            }
            return None;
        }
        if bindings.is_up(&key) {
            self.selected = self.selected.saturating_sub(1);
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('/') => {
                self.focus = DeliveryFocus::Search;
                None
            }
            KeyCode::Char('n') => {
                self.focus = DeliveryFocus::RowCount;
                None
            }
            KeyCode::Char('+') => Some(DeliveryAction::StepRows(MoveDirection::Up)),
            KeyCode::Char('-') => Some(DeliveryAction::StepRows(MoveDirection::Down)),
            KeyCode::Char('m') => Some(DeliveryAction::OpenMenu),
            KeyCode::Char('f') => Some(DeliveryAction::ToggleFullscreen),
            KeyCode::Char('c') => Some(DeliveryAction::ColumnSettings),
            KeyCode::Char('r') => Some(DeliveryAction::RowSettings),
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = rows.saturating_sub(1);
                None
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(DeliveryAction::Close),
            _ => None,
        }
    }

    /// Get the area the dialog occupies within `area`.
    pub fn dialog_area(&self, area: Rect) -> Rect {
        if self.maximized {
            area
        } else {
            centered_percent(area, 80, 80)
        }
    }

    /// Render the dialog.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, table: &TableController) {
        let t = theme();
        let dialog = self.dialog_area(area);
        frame.render_widget(Clear, dialog);

        let title = match table.detail_route() {
            Some(route) => format!(" Delivery List - {} ", route.describe()),
            None => " Delivery List ".to_string(),
        };
        let fullscreen_hint = if self.maximized {
            " [f] restore "
        } else {
            " [f] fullscreen "
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(fullscreen_hint).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let toolbar = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(20)])
            .split(chunks[0]);
        self.search.render_inline(
            frame,
            toolbar[0],
            "Search",
            self.focus == DeliveryFocus::Search,
        );
        self.row_input.render_inline(
            frame,
            toolbar[1],
            "Rows",
            self.focus == DeliveryFocus::RowCount,
        );

        self.render_table(frame, chunks[2], table);

        let status = format!(
            "Showing {} of {} rows",
            table.filtered().len(),
            table.deliveries().len()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(t.dim)))
                .alignment(Alignment::Right),
            chunks[3],
        );
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, table: &TableController) {
        let t = theme();
        let rows = table.filtered();

        if rows.is_empty() {
            let message = if table.query().is_empty() {
                "No deliveries".to_string()
            } else {
                format!("No deliveries match \"{}\"", table.query())
            };
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(t.dim)))
                    .alignment(Alignment::Center),
                area,
            );
            self.table_state.select(None);
            return;
        }

        let columns = table.visible_columns();
        let header = Row::new(columns.iter().map(|c| {
            Cell::from(c.header).style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD))
        }));
        let widths: Vec<Constraint> = columns.iter().map(|c| column_width(c.field)).collect();
        let query = table.query();
        let body: Vec<Row> = rows
            .iter()
            .map(|delivery| {
                Row::new(
                    columns
                        .iter()
                        .map(|c| delivery_cell(delivery, c.field, query))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let widget = Table::new(body, widths)
            .header(header)
            .highlight_style(Style::default().bg(t.highlight).add_modifier(Modifier::BOLD));

        self.selected = self.selected.min(rows.len() - 1);
        self.table_state.select(Some(self.selected));
        frame.render_stateful_widget(widget, area, &mut self.table_state);
    }
}

impl Default for DeliveryListView {
    fn default() -> Self {
        Self::new()
    }
}

/// Column width for a field.
pub(crate) fn column_width(field: ColumnField) -> Constraint {
    match field {
        ColumnField::No => Constraint::Length(5),
        ColumnField::Code => Constraint::Length(8),
        ColumnField::Location => Constraint::Min(16),
        ColumnField::Delivery => Constraint::Length(10),
        ColumnField::Action => Constraint::Length(8),
    }
}

/// Render one cell, highlighting search matches in the searchable fields.
pub(crate) fn delivery_cell(delivery: &Delivery, field: ColumnField, query: &str) -> Cell<'static> {
    match field {
        ColumnField::No => Cell::from(delivery.no.to_string()),
        ColumnField::Code => Cell::from(highlight_text(&delivery.code.to_string(), query)),
        ColumnField::Location => Cell::from(highlight_text(&delivery.location, query)),
        ColumnField::Delivery => Cell::from(highlight_text(delivery.delivery.label(), query)),
        ColumnField::Action => {
            Cell::from(Span::styled("✎  ✕", Style::default().fg(theme().dim)))
        }
    }
}

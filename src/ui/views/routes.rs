//! Route table view.
//!
//! Pinned routes are drawn first, then the unlocked routes in id order. The
//! cursor walks both partitions as one list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::data::Route;
use crate::events::KeyBindings;
use crate::table::TableController;
use crate::ui::theme::theme;

/// Actions that can be returned from the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Pin or unpin the route at `index` of the given partition.
    ToggleLock { locked: bool, index: usize },
    /// Open the delivery list of the route at `index` of the given partition.
    Open { locked: bool, index: usize },
    /// Quit the application.
    Quit,
}

/// The route table view.
#[derive(Debug, Default)]
pub struct RouteTableView {
    /// Cursor over locked then unlocked routes.
    selected: usize,
    table_state: TableState,
}

impl RouteTableView {
    /// Create a new route table view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cursor position.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Map the cursor to a partition and index within it.
    pub fn selection(&self, table: &TableController) -> Option<(bool, usize)> {
        let locked = table.locked_routes().len();
        if self.selected < locked {
            Some((true, self.selected))
        } else if self.selected < table.route_count() {
            Some((false, self.selected - locked))
        } else {
            None
        }
    }

    /// Keep the cursor on the route with `id` after the partitions changed.
    pub fn follow_route(&mut self, table: &TableController, id: u32) {
        let position = table
            .locked_routes()
            .iter()
            .chain(table.unlocked_routes())
            .position(|r| r.id == id);
        if let Some(position) = position {
            self.selected = position;
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        bindings: &KeyBindings,
        table: &TableController,
    ) -> Option<RouteAction> {
        let count = table.route_count();
        if bindings.is_down(&key) {
            if self.selected + 1 < count {
                self.selected += 1;
            }
            return None;
        }
        if bindings.is_up(&key) {
            self.selected = self.selected.saturating_sub(1);
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.selected = 0;
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.selected = count.saturating_sub(1);
                None
            }
            (KeyCode::Char(' '), _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                match self.selection(table) {
                    // Pinning is disabled while the locked partition is full
                    Some((false, _)) if !table.can_lock() => None,
                    selection => {
                        selection.map(|(locked, index)| RouteAction::ToggleLock { locked, index })
                    }
                }
            }
            (KeyCode::Enter, _) => self
                .selection(table)
                .map(|(locked, index)| RouteAction::Open { locked, index }),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(RouteAction::Quit),
            _ => None,
        }
    }

    /// Render the route table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, table: &TableController) {
        let t = theme();
        let can_lock = table.can_lock();

        let header = Row::new(["Route", "Warehouse", "Shift", "Action"].map(|h| {
            Cell::from(h).style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD))
        }));

        let locked_rows = table
            .locked_routes()
            .iter()
            .map(|route| route_row(route, true, true));
        let unlocked_rows = table
            .unlocked_routes()
            .iter()
            .map(|route| route_row(route, false, can_lock));
        let rows: Vec<Row> = locked_rows.chain(unlocked_rows).collect();

        let title = format!(
            " Routes ({} pinned / {}) ",
            table.locked_routes().len(),
            table.route_count()
        );

        let widget = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.dim)),
        )
        .highlight_style(Style::default().bg(t.highlight).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

        if table.route_count() == 0 {
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(table.route_count() - 1);
            self.table_state.select(Some(self.selected));
        }
        frame.render_stateful_widget(widget, area, &mut self.table_state);
    }
}

/// Build one table row. `lock_enabled` is false when pinning is at capacity.
fn route_row(route: &Route, locked: bool, lock_enabled: bool) -> Row<'static> {
    let t = theme();
    let lock = if locked {
        Span::styled("● pinned", Style::default().fg(t.locked))
    } else if lock_enabled {
        Span::styled("○ pin", Style::default().fg(t.fg))
    } else {
        Span::styled("○ pin", Style::default().fg(t.dim).add_modifier(Modifier::DIM))
    };
    let action = Line::from(vec![
        Span::styled("≡ list  ", Style::default().fg(t.accent)),
        lock,
    ]);

    let row = Row::new(vec![
        Cell::from(route.route.clone()),
        Cell::from(route.warehouse.clone()),
        Cell::from(route.shift.label()),
        Cell::from(action),
    ]);
    if locked {
        row.style(Style::default().fg(t.locked))
    } else {
        row
    }
}

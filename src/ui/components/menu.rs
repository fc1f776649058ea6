//! Popup menu of the delivery list.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::events::KeyBindings;
use crate::ui::theme::theme;

/// An entry of the delivery list menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Fullscreen,
    RowSettings,
    ColumnSettings,
}

impl MenuItem {
    /// All entries, in display order.
    pub const ALL: [MenuItem; 3] = [
        MenuItem::Fullscreen,
        MenuItem::RowSettings,
        MenuItem::ColumnSettings,
    ];

    /// Get the label, which for the fullscreen entry depends on the current mode.
    pub fn label(&self, maximized: bool) -> &'static str {
        match self {
            MenuItem::Fullscreen if maximized => "Exit Fullscreen",
            MenuItem::Fullscreen => "Fullscreen",
            MenuItem::RowSettings => "Row Settings",
            MenuItem::ColumnSettings => "Column Settings",
        }
    }
}

/// Action returned from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Select(MenuItem),
    Cancel,
}

/// Popup menu state.
#[derive(Debug, Default)]
pub struct Menu {
    selected: usize,
    visible: bool,
    list_state: ListState,
}

impl Menu {
    /// Create a hidden menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the menu with the first entry selected.
    pub fn show(&mut self) {
        self.selected = 0;
        self.list_state.select(Some(0));
        self.visible = true;
    }

    /// Check if the menu is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the selected entry.
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    /// Handle keyboard input, returning an action when the menu closes.
    pub fn handle_input(&mut self, key: KeyEvent, bindings: &KeyBindings) -> Option<MenuAction> {
        if bindings.is_down(&key) {
            self.selected = (self.selected + 1).min(MenuItem::ALL.len() - 1);
            self.list_state.select(Some(self.selected));
            return None;
        }
        if bindings.is_up(&key) {
            self.selected = self.selected.saturating_sub(1);
            self.list_state.select(Some(self.selected));
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                self.visible = false;
                Some(MenuAction::Select(self.selected()))
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => {
                self.visible = false;
                Some(MenuAction::Cancel)
            }
            _ => None,
        }
    }

    /// Render the menu centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, maximized: bool) {
        if !self.visible {
            return;
        }
        let t = theme();

        let dialog = centered_rect(area, 30, MenuItem::ALL.len() as u16 + 3);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(Span::styled(
                " Menu ",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label(maximized)))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(t.fg)
                    .bg(t.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let list_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        let hint_area = Rect {
            y: inner.y + list_area.height,
            height: 1,
            ..inner
        };
        let hint = Paragraph::new(Span::styled(
            "Enter:select  Esc:close",
            Style::default().fg(t.dim),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_show_selects_first() {
        let mut menu = Menu::new();
        assert!(!menu.is_visible());
        menu.show();
        assert!(menu.is_visible());
        assert_eq!(menu.selected(), MenuItem::Fullscreen);
    }

    #[test]
    fn test_navigate_and_select() {
        let bindings = KeyBindings::default();
        let mut menu = Menu::new();
        menu.show();
        assert_eq!(menu.handle_input(key(KeyCode::Char('j')), &bindings), None);
        assert_eq!(menu.handle_input(key(KeyCode::Down), &bindings), None);
        assert_eq!(menu.handle_input(key(KeyCode::Down), &bindings), None);
        assert_eq!(
            menu.handle_input(key(KeyCode::Enter), &bindings),
            Some(MenuAction::Select(MenuItem::ColumnSettings))
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_cancel() {
        let bindings = KeyBindings::default();
        let mut menu = Menu::new();
        menu.show();
        menu.handle_input(key(KeyCode::Up), &bindings);
        assert_eq!(menu.selected(), MenuItem::Fullscreen);
        assert_eq!(
            menu.handle_input(key(KeyCode::Esc), &bindings),
            Some(MenuAction::Cancel)
        );
    }

    #[test]
    fn test_fullscreen_label() {
        assert_eq!(MenuItem::Fullscreen.label(false), "Fullscreen");
        assert_eq!(MenuItem::Fullscreen.label(true), "Exit Fullscreen");
        assert_eq!(MenuItem::RowSettings.label(true), "Row Settings");
    }
}

//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: every key press
//! arrives through [`App::update`], is translated by the focused view into an
//! action, and the action is applied to the [`TableController`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::events::{Event, KeyBindings, KeyContext};
use crate::table::{TableController, ToggleOutcome, MAX_LOCKED};
use crate::ui::theme::theme;
use crate::ui::{
    render_context_help, ColumnSettingsAction, ColumnSettingsView, DeliveryAction, DeliveryFocus,
    DeliveryListView, HelpAction, HelpView, Menu, MenuAction, MenuItem, NotificationManager,
    RouteAction, RouteTableView, RowSettingsAction, RowSettingsView,
};

/// The current screen or dialog of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The route table.
    #[default]
    RouteList,
    /// The delivery list dialog of the open route.
    DeliveryList,
    /// Column settings, over the delivery list.
    ColumnSettings,
    /// Row reorder staging, over the delivery list.
    RowSettings,
    /// Help overlay.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    /// Where closing help returns to.
    help_return: AppState,
    should_quit: bool,
    table: TableController,
    bindings: KeyBindings,
    route_view: RouteTableView,
    delivery_view: DeliveryListView,
    column_view: ColumnSettingsView,
    row_view: RowSettingsView,
    help_view: HelpView,
    menu: Menu,
    notifications: NotificationManager,
}

impl App {
    /// Create the application around a table controller.
    pub fn new(table: TableController, bindings: KeyBindings) -> Self {
        debug!(vim_mode = bindings.vim_mode, "Creating application");
        Self {
            state: AppState::RouteList,
            help_return: AppState::RouteList,
            should_quit: false,
            table,
            bindings,
            route_view: RouteTableView::new(),
            delivery_view: DeliveryListView::new(),
            column_view: ColumnSettingsView::new(),
            row_view: RowSettingsView::new(),
            help_view: HelpView::new(),
            menu: Menu::new(),
            notifications: NotificationManager::new(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Get the table controller.
    pub fn table(&self) -> &TableController {
        &self.table
    }

    /// Get the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Get the delivery list view.
    pub fn delivery_view(&self) -> &DeliveryListView {
        &self.delivery_view
    }

    /// Check if the delivery list menu is open.
    pub fn is_menu_visible(&self) -> bool {
        self.menu.is_visible()
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => self.quit(),
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.notifications.tick(),
        }
    }

    /// Whether '?' should open help rather than reach the focused widget.
    fn accepts_help_key(&self) -> bool {
        match self.state {
            AppState::RouteList => true,
            AppState::DeliveryList => {
                !self.menu.is_visible() && self.delivery_view.focus() == DeliveryFocus::Table
            }
            _ => false,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        if key.code == KeyCode::Char('?') && self.accepts_help_key() {
            debug!(from = ?self.state, "Opening help");
            self.help_return = self.state;
            self.help_view.reset_scroll();
            self.state = AppState::Help;
            return;
        }

        match self.state {
            AppState::RouteList => {
                if let Some(action) =
                    self.route_view
                        .handle_input(key, &self.bindings, &self.table)
                {
                    self.handle_route_action(action);
                }
            }
            AppState::DeliveryList => {
                if self.menu.is_visible() {
                    if let Some(action) = self.menu.handle_input(key, &self.bindings) {
                        self.handle_menu_action(action);
                    }
                } else if let Some(action) =
                    self.delivery_view
                        .handle_input(key, &self.bindings, &self.table)
                {
                    self.handle_delivery_action(action);
                }
            }
            AppState::ColumnSettings => {
                if let Some(action) =
                    self.column_view
                        .handle_input(key, &self.bindings, &self.table)
                {
                    self.handle_column_action(action);
                }
            }
            AppState::RowSettings => {
                let rows = self.table.staging().map_or(0, |s| s.rows().len());
                if let Some(action) = self.row_view.handle_input(key, &self.bindings, rows) {
                    self.handle_row_action(action);
                }
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key) {
                    self.state = self.help_return;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn route_label(&self, id: u32) -> String {
        self.table
            .locked_routes()
            .iter()
            .chain(self.table.unlocked_routes())
            .find(|r| r.id == id)
            .map(|r| r.describe())
            .unwrap_or_else(|| format!("Route {}", id))
    }

    fn handle_route_action(&mut self, action: RouteAction) {
        match action {
            RouteAction::ToggleLock { locked, index } => {
                match self.table.toggle_lock(locked, index) {
                    ToggleOutcome::Locked(id) => {
                        self.route_view.follow_route(&self.table, id);
                        let label = self.route_label(id);
                        self.notifications.success(format!("Pinned {}", label));
                    }
                    ToggleOutcome::Unlocked(id) => {
                        self.route_view.follow_route(&self.table, id);
                        let label = self.route_label(id);
                        self.notifications.info(format!("Unpinned {}", label));
                    }
                    ToggleOutcome::Rejected(reason) => {
                        debug!(locked, index, ?reason, "Lock toggle ignored");
                    }
                }
            }
            RouteAction::Open { locked, index } => {
                if self.table.open_route(locked, index) {
                    self.delivery_view.reset(&self.table);
                    self.state = AppState::DeliveryList;
                }
            }
            RouteAction::Quit => self.quit(),
        }
    }

    fn handle_delivery_action(&mut self, action: DeliveryAction) {
        match action {
            DeliveryAction::QueryChanged(query) => self.table.set_query(query),
            DeliveryAction::RowInputChanged(text) => {
                if self.table.set_row_input(text) {
                    self.notify_regenerated();
                }
            }
            DeliveryAction::StepRows(direction) => {
                let before = self.table.row_count();
                self.table.adjust_row_count(direction);
                self.delivery_view.sync_row_input(&self.table);
                if self.table.row_count() != before {
                    self.notify_regenerated();
                }
            }
            DeliveryAction::OpenMenu => self.menu.show(),
            DeliveryAction::ToggleFullscreen => self.delivery_view.toggle_maximized(),
            DeliveryAction::ColumnSettings => self.open_column_settings(),
            DeliveryAction::RowSettings => self.open_row_settings(),
            DeliveryAction::Close => {
                debug!("Closing delivery list");
                if self.delivery_view.is_maximized() {
                    self.delivery_view.toggle_maximized();
                }
                self.state = AppState::RouteList;
            }
        }
    }

    fn notify_regenerated(&mut self) {
        self.notifications
            .info(format!("Generated {} deliveries", self.table.row_count()));
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Select(MenuItem::Fullscreen) => self.delivery_view.toggle_maximized(),
            MenuAction::Select(MenuItem::RowSettings) => self.open_row_settings(),
            MenuAction::Select(MenuItem::ColumnSettings) => self.open_column_settings(),
            MenuAction::Cancel => {}
        }
    }

    fn open_column_settings(&mut self) {
        self.column_view.set_cursor(0);
        self.state = AppState::ColumnSettings;
    }

    fn open_row_settings(&mut self) {
        self.table.open_staging();
        self.row_view.reset();
        self.state = AppState::RowSettings;
    }

    fn handle_column_action(&mut self, action: ColumnSettingsAction) {
        match action {
            ColumnSettingsAction::Toggle(field) => self.table.toggle_column_visibility(field),
            ColumnSettingsAction::Move { index, direction } => {
                if let Some(new_index) = self.table.move_column(index, direction) {
                    self.column_view.set_cursor(new_index);
                }
            }
            ColumnSettingsAction::Close => self.state = AppState::DeliveryList,
        }
    }

    fn handle_row_action(&mut self, action: RowSettingsAction) {
        match action {
            RowSettingsAction::Type { row, c } => self.table.push_position_char(row, c),
            RowSettingsAction::Erase { row } => self.table.pop_position_char(row),
            RowSettingsAction::Commit { row } => {
                if let Some(new_index) = self.table.commit_position(row) {
                    debug!(row, new_index, "Staged row moved");
                }
            }
            RowSettingsAction::Apply => {
                // Commit the focused field before applying
                let row = self.row_view.cursor();
                if let Some(new_index) = self.table.commit_position(row) {
                    debug!(row, new_index, "Staged row moved on apply");
                }
                if self.table.apply_staging() {
                    self.notifications.success("Row order applied");
                }
                self.state = AppState::DeliveryList;
            }
            RowSettingsAction::Cancel => {
                self.table.cancel_staging();
                self.state = AppState::DeliveryList;
            }
        }
    }

    /// The hint context of whatever currently has focus.
    fn key_context(&self) -> KeyContext {
        match self.state {
            AppState::RouteList | AppState::Exiting => KeyContext::RouteList,
            AppState::DeliveryList if self.menu.is_visible() => KeyContext::Menu,
            AppState::DeliveryList => self.delivery_view.key_context(),
            AppState::ColumnSettings => KeyContext::ColumnSettings,
            AppState::RowSettings => KeyContext::RowSettings,
            AppState::Help => KeyContext::Help,
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.route_view.render(frame, chunks[1], &self.table);

        let dialog_state = match self.state {
            AppState::Help => self.help_return,
            state => state,
        };
        if matches!(
            dialog_state,
            AppState::DeliveryList | AppState::ColumnSettings | AppState::RowSettings
        ) {
            let dialog_area = if self.delivery_view.is_maximized() {
                area
            } else {
                chunks[1]
            };
            self.delivery_view.render(frame, dialog_area, &self.table);
            match dialog_state {
                AppState::ColumnSettings => {
                    self.column_view.render(frame, dialog_area, &self.table)
                }
                AppState::RowSettings => self.row_view.render(frame, dialog_area, &self.table),
                _ => self
                    .menu
                    .render(frame, dialog_area, self.delivery_view.is_maximized()),
            }
        }

        if self.state == AppState::Help {
            self.help_view.render(frame, chunks[1]);
        }

        render_context_help(frame, chunks[2], self.key_context());
        self.notifications.render(frame, chunks[1]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(
                " Mappmarker ",
                Style::default().fg(t.bg).bg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} routes, {}/{} pinned",
                    self.table.route_count(),
                    self.table.locked_routes().len(),
                    MAX_LOCKED
                ),
                Style::default().fg(t.dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockDataSource;
    use crate::table::ColumnField;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        let table = TableController::new(Box::new(MockDataSource::seeded(42)), 6, 20);
        App::new(table, KeyBindings::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn open_first_route(app: &mut App) {
        press(app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::DeliveryList);
    }

    #[test]
    fn test_app_starts_on_route_table() {
        let app = test_app();
        assert_eq!(app.state(), AppState::RouteList);
        assert!(!app.should_quit());
        assert_eq!(app.table().locked_routes().len(), 1);
    }

    #[test]
    fn test_lock_limit_is_silent() {
        let mut app = test_app();
        // Cursor onto the first unlocked route and pin it
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.table().locked_routes().len(), 2);
        assert_eq!(app.notifications().len(), 1);

        // A third pin does nothing and reports nothing
        let locked: Vec<u32> = app.table().locked_routes().iter().map(|r| r.id).collect();
        let unlocked: Vec<u32> = app.table().unlocked_routes().iter().map(|r| r.id).collect();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.notifications().len(), 1);
        let locked_after: Vec<u32> = app.table().locked_routes().iter().map(|r| r.id).collect();
        let unlocked_after: Vec<u32> =
            app.table().unlocked_routes().iter().map(|r| r.id).collect();
        assert_eq!(locked_after, locked);
        assert_eq!(unlocked_after, unlocked);
    }

    #[test]
    fn test_unlock_keeps_cursor_on_route() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.table().locked_routes().is_empty());
        // Route 1 is back at the head of the unlocked list
        assert_eq!(app.table().unlocked_routes()[0].id, 1);
        assert_eq!(app.route_view.selected(), 0);
    }

    #[test]
    fn test_search_filters_deliveries() {
        let mut app = test_app();
        open_first_route(&mut app);

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "week");
        assert_eq!(app.table().query(), "week");
        assert!(app
            .table()
            .filtered()
            .iter()
            .all(|d| d.delivery.label() == "Weekly"));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.state(), AppState::RouteList);
    }

    #[test]
    fn test_row_count_field_regenerates() {
        let mut app = test_app();
        open_first_route(&mut app);

        press(&mut app, KeyCode::Char('n'));
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        )));
        type_str(&mut app, "5");
        assert_eq!(app.table().deliveries().len(), 5);
        assert_eq!(app.table().row_count(), 5);

        // "50" and "500" regenerate, "5000" and up stay in the field only
        type_str(&mut app, "0000");
        assert_eq!(app.table().row_input(), "50000");
        assert_eq!(app.table().row_count(), 500);
        assert_eq!(app.table().deliveries().len(), 500);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.table().row_count(), 501);
        assert_eq!(app.table().row_input(), "501");
    }

    #[test]
    fn test_menu_toggles_fullscreen() {
        let mut app = test_app();
        open_first_route(&mut app);

        press(&mut app, KeyCode::Char('m'));
        assert!(app.is_menu_visible());
        press(&mut app, KeyCode::Enter);
        assert!(!app.is_menu_visible());
        assert!(app.delivery_view().is_maximized());

        press(&mut app, KeyCode::Char('f'));
        assert!(!app.delivery_view().is_maximized());

        // Closing the dialog leaves fullscreen
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.delivery_view().is_maximized());
    }

    #[test]
    fn test_column_settings_hide_and_move() {
        let mut app = test_app();
        open_first_route(&mut app);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state(), AppState::ColumnSettings);

        // Hide "Code"
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app
            .table()
            .visible_columns()
            .iter()
            .all(|c| c.field != ColumnField::Code));

        // Move "Code" down past "Location"
        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.table().columns()[2].field, ColumnField::Code);
        assert_eq!(app.column_view.cursor(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::DeliveryList);
    }

    #[test]
    fn test_row_settings_reorder_and_apply() {
        let mut app = test_app();
        open_first_route(&mut app);
        let before: Vec<u32> = app.table().filtered().iter().map(|d| d.code).collect();
        assert!(before.len() >= 5);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state(), AppState::RowSettings);

        // Focus the third row and send it to position 1
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Enter);
        // Nothing applied yet
        assert_eq!(app.table().deliveries()[0].code, before[0]);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state(), AppState::DeliveryList);
        let after = app.table().deliveries();
        assert_eq!(after[0].code, before[2]);
        assert_eq!(after[1].code, before[0]);
        assert!(after.iter().enumerate().all(|(i, d)| d.no == i + 1));
    }

    #[test]
    fn test_row_settings_apply_commits_focused_field() {
        let mut app = test_app();
        open_first_route(&mut app);
        let before: Vec<u32> = app.table().filtered().iter().map(|d| d.code).collect();

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1");
        // Apply straight from the field without Enter or Tab
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.state(), AppState::DeliveryList);
        let after = app.table().deliveries();
        assert_eq!(after[0].code, before[2]);
        assert_eq!(after[1].code, before[0]);
        assert_eq!(after[2].code, before[1]);
    }

    #[test]
    fn test_row_settings_cancel_discards() {
        let mut app = test_app();
        open_first_route(&mut app);
        let before: Vec<u32> = app.table().deliveries().iter().map(|d| d.code).collect();

        press(&mut app, KeyCode::Char('r'));
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state(), AppState::DeliveryList);
        assert!(!app.table().is_staging());
        let after: Vec<u32> = app.table().deliveries().iter().map(|d| d.code).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_help_returns_to_previous_state() {
        let mut app = test_app();
        open_first_route(&mut app);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state(), AppState::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::DeliveryList);
    }

    #[test]
    fn test_question_mark_is_text_while_searching() {
        let mut app = test_app();
        open_first_route(&mut app);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state(), AppState::DeliveryList);
        assert_eq!(app.table().query(), "?");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);

        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_view_renders_every_state() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        open_first_route(&mut app);
        terminal.draw(|frame| app.view(frame)).unwrap();
        press(&mut app, KeyCode::Char('m'));
        terminal.draw(|frame| app.view(frame)).unwrap();
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('c'));
        terminal.draw(|frame| app.view(frame)).unwrap();
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('r'));
        terminal.draw(|frame| app.view(frame)).unwrap();
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('?'));
        terminal.draw(|frame| app.view(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Keyboard Shortcuts"));
    }
}

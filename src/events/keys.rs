//! Key binding definitions.
//!
//! Navigation keys depend on whether vim-style bindings are enabled. The
//! binding tables below feed both the hint bar and the help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings (j/k) are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Check if the key moves the cursor down.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Down, KeyModifiers::NONE) => true,
            (KeyCode::Char('j'), KeyModifiers::NONE) => self.vim_mode,
            _ => false,
        }
    }

    /// Check if the key moves the cursor up.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Up, KeyModifiers::NONE) => true,
            (KeyCode::Char('k'), KeyModifiers::NONE) => self.vim_mode,
            _ => false,
        }
    }

    /// Check if the key moves the focused item down in an ordering.
    pub fn is_move_down(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Down => key.modifiers.contains(KeyModifiers::SHIFT),
            KeyCode::Char('J') => self.vim_mode,
            _ => false,
        }
    }

    /// Check if the key moves the focused item up in an ordering.
    pub fn is_move_up(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => key.modifiers.contains(KeyModifiers::SHIFT),
            KeyCode::Char('K') => self.vim_mode,
            _ => false,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

/// The screen or dialog a key binding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    RouteList,
    DeliveryList,
    Search,
    RowCount,
    Menu,
    ColumnSettings,
    RowSettings,
    Help,
}

impl KeyContext {
    /// Get the display name for this context.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Global => "Global",
            KeyContext::RouteList => "Route Table",
            KeyContext::DeliveryList => "Delivery List",
            KeyContext::Search => "Search",
            KeyContext::RowCount => "Row Count",
            KeyContext::Menu => "Menu",
            KeyContext::ColumnSettings => "Column Settings",
            KeyContext::RowSettings => "Row Settings",
            KeyContext::Help => "Help",
        }
    }
}

/// A documented key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// The key or key combination, as displayed.
    pub key: &'static str,
    /// What the key does.
    pub description: &'static str,
    /// Where the key applies.
    pub context: KeyContext,
}

impl Keybinding {
    const fn new(key: &'static str, description: &'static str, context: KeyContext) -> Self {
        Self {
            key,
            description,
            context,
        }
    }
}

/// Get every documented key binding.
pub fn get_keybindings() -> Vec<Keybinding> {
    use KeyContext::*;
    vec![
        Keybinding::new("Ctrl+c", "Quit application", Global),
        Keybinding::new("?", "Show help", Global),
        Keybinding::new("j / ↓", "Move down", RouteList),
        Keybinding::new("k / ↑", "Move up", RouteList),
        Keybinding::new("Space / l", "Lock or unlock route", RouteList),
        Keybinding::new("Enter", "Open delivery list", RouteList),
        Keybinding::new("q", "Quit application", RouteList),
        Keybinding::new("j / ↓", "Move down", DeliveryList),
        Keybinding::new("k / ↑", "Move up", DeliveryList),
        Keybinding::new("/", "Search deliveries", DeliveryList),
        Keybinding::new("n", "Edit row count", DeliveryList),
        Keybinding::new("+ / -", "Add or remove a row", DeliveryList),
        Keybinding::new("m", "Open menu", DeliveryList),
        Keybinding::new("f", "Toggle fullscreen", DeliveryList),
        Keybinding::new("c", "Column settings", DeliveryList),
        Keybinding::new("r", "Row settings", DeliveryList),
        Keybinding::new("q / Esc", "Close delivery list", DeliveryList),
        Keybinding::new("Enter / Esc", "Finish search", Search),
        Keybinding::new("Ctrl+u", "Clear search", Search),
        Keybinding::new("Enter / Esc", "Finish editing", RowCount),
        Keybinding::new("j / k", "Move selection", Menu),
        Keybinding::new("Enter", "Run selected item", Menu),
        Keybinding::new("Esc", "Close menu", Menu),
        Keybinding::new("j / k", "Move selection", ColumnSettings),
        Keybinding::new("Space", "Show or hide column", ColumnSettings),
        Keybinding::new("K / Shift+↑", "Move column up", ColumnSettings),
        Keybinding::new("J / Shift+↓", "Move column down", ColumnSettings),
        Keybinding::new("Esc / q", "Close", ColumnSettings),
        Keybinding::new("0-9", "Type new position", RowSettings),
        Keybinding::new("j / k / Tab", "Commit and move focus", RowSettings),
        Keybinding::new("Enter", "Commit position", RowSettings),
        Keybinding::new("a", "Apply row order", RowSettings),
        Keybinding::new("Esc", "Cancel", RowSettings),
        Keybinding::new("j / k", "Scroll", Help),
        Keybinding::new("? / q / Esc", "Close help", Help),
    ]
}

/// Get the key bindings grouped by context, in first-seen order.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    let mut grouped: Vec<(KeyContext, Vec<Keybinding>)> = Vec::new();
    for binding in get_keybindings() {
        match grouped.iter_mut().find(|(ctx, _)| *ctx == binding.context) {
            Some((_, bindings)) => bindings.push(binding),
            None => grouped.push((binding.context, vec![binding])),
        }
    }
    grouped
}

/// Get the short hint line shown at the bottom of the screen for a context.
///
/// Keys are wrapped in brackets so the hint bar can style them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Global | KeyContext::RouteList => {
            "[j/k] move  [Space] lock  [Enter] deliveries  [?] help  [q] quit"
        }
        KeyContext::DeliveryList => {
            "[/] search  [n] rows  [+/-] step  [m] menu  [c] columns  [r] reorder  [q] close"
        }
        KeyContext::Search => "[type] filter  [Ctrl+u] clear  [Enter/Esc] done",
        KeyContext::RowCount => "[0-9] row count (1-1000)  [Enter/Esc] done",
        KeyContext::Menu => "[j/k] move  [Enter] select  [Esc] close",
        KeyContext::ColumnSettings => "[j/k] move  [Space] show/hide  [K/J] reorder  [Esc] close",
        KeyContext::RowSettings => "[0-9] position  [Tab/j/k] commit  [a] apply  [Esc] cancel",
        KeyContext::Help => "[j/k] scroll  [Esc] close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_navigation() {
        let bindings = KeyBindings::new(true);
        assert!(bindings.is_down(&key(KeyCode::Char('j'))));
        assert!(bindings.is_up(&key(KeyCode::Char('k'))));
        assert!(bindings.is_down(&key(KeyCode::Down)));
        assert!(bindings.is_up(&key(KeyCode::Up)));
    }

    #[test]
    fn test_arrow_only_navigation() {
        let bindings = KeyBindings::new(false);
        assert!(!bindings.is_down(&key(KeyCode::Char('j'))));
        assert!(!bindings.is_up(&key(KeyCode::Char('k'))));
        assert!(bindings.is_down(&key(KeyCode::Down)));
        assert!(!bindings.is_move_up(&key(KeyCode::Char('K'))));
    }

    #[test]
    fn test_move_keys() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_move_up(&KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT)));
        assert!(bindings.is_move_down(&KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT)));
        assert!(!bindings.is_move_down(&key(KeyCode::Down)));
    }

    #[test]
    fn test_grouped_bindings_cover_contexts() {
        let grouped = get_keybindings_grouped();
        assert_eq!(grouped[0].0, KeyContext::Global);
        let contexts: Vec<KeyContext> = grouped.iter().map(|(c, _)| *c).collect();
        assert!(contexts.contains(&KeyContext::RowSettings));
        let total: usize = grouped.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, get_keybindings().len());
    }

    #[test]
    fn test_context_hints_have_keys() {
        for context in [
            KeyContext::RouteList,
            KeyContext::DeliveryList,
            KeyContext::Search,
            KeyContext::RowCount,
            KeyContext::Menu,
            KeyContext::ColumnSettings,
            KeyContext::RowSettings,
            KeyContext::Help,
        ] {
            assert!(get_context_hints(context).starts_with('['));
        }
    }
}

//! Theme and styling configuration.
//!
//! The active theme is set once at start-up with [`init_theme`] and read
//! everywhere through [`theme`].

use std::sync::OnceLock;

use ratatui::style::Color;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Accent color for borders and titles.
    pub accent: Color,
    /// Highlight background for the selected row.
    pub highlight: Color,
    /// Dimmed text (hints, disabled controls).
    pub dim: Color,
    /// Warning color, also used for search matches.
    pub warning: Color,
    /// Success color.
    pub success: Color,
    /// Color of pinned rows.
    pub locked: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            highlight: Color::DarkGray,
            dim: Color::DarkGray,
            warning: Color::Yellow,
            success: Color::Green,
            locked: Color::LightBlue,
        }
    }

    /// A light theme for bright terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            highlight: Color::Gray,
            dim: Color::Gray,
            warning: Color::Magenta,
            success: Color::Green,
            locked: Color::Blue,
        }
    }

    /// Get a theme by its configuration name, falling back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Set the active theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Load and activate the theme named in the configuration.
pub fn load_theme(name: &str) {
    init_theme(Theme::from_name(name));
}

/// Get the active theme, or the dark theme if none was set.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light"), Theme::light());
        assert_eq!(Theme::from_name("dark"), Theme::dark());
        assert_eq!(Theme::from_name("unknown"), Theme::dark());
    }

    #[test]
    fn test_theme_always_available() {
        // Whatever was set first, a theme is always returned
        let t = theme();
        assert_ne!(t.fg, t.bg);
    }
}

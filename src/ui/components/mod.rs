//! Reusable UI components.

mod help_bar;
mod highlight;
mod input;
mod menu;
mod notification;

use ratatui::layout::Rect;

pub use help_bar::render_context_help;
pub use highlight::highlight_text;
pub use input::TextInput;
pub use menu::{Menu, MenuAction, MenuItem};
pub use notification::{Notification, NotificationKind, NotificationManager};

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Calculate a centered rectangle covering a percentage of the given area.
pub fn centered_percent(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = area.height.saturating_mul(percent_y) / 100;
    centered_rect(area, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 30, 10), Rect::new(35, 15, 30, 10));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(2, 2, 20, 10);
        assert_eq!(centered_rect(area, 50, 50), area);
    }

    #[test]
    fn test_centered_percent() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_percent(area, 75, 50), Rect::new(12, 10, 75, 20));
    }
}

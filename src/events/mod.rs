//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and turned into [`Event`]s
//! that drive `App::update`.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{
    get_context_hints, get_keybindings, get_keybindings_grouped, KeyBindings, KeyContext,
    Keybinding,
};

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick rate elapsed without input.
    Tick,
    /// The application should quit.
    Quit,
}

//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::table::{MAX_ROW_COUNT, MIN_ROW_COUNT};

/// Largest number of routes that can be generated.
pub const MAX_ROUTE_COUNT: usize = 100;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Event poll timeout in milliseconds.
    pub tick_rate_ms: u64,
    /// Number of routes generated at start-up.
    pub route_count: usize,
    /// Row count used when regenerating deliveries.
    pub initial_row_count: usize,
    /// Fixed seed for generated data. Random when unset.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            tick_rate_ms: 100,
            route_count: 10,
            initial_row_count: 20,
            seed: None,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.theme.as_str(), "dark" | "light") {
            return Err(ConfigError::ValidationError(format!(
                "unknown theme '{}', expected 'dark' or 'light'",
                self.theme
            )));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        if self.route_count == 0 || self.route_count > MAX_ROUTE_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "route_count must be between 1 and {}, got {}",
                MAX_ROUTE_COUNT, self.route_count
            )));
        }

        if !(MIN_ROW_COUNT..=MAX_ROW_COUNT).contains(&self.initial_row_count) {
            return Err(ConfigError::ValidationError(format!(
                "initial_row_count must be between {} and {}, got {}",
                MIN_ROW_COUNT, MAX_ROW_COUNT, self.initial_row_count
            )));
        }

        Ok(())
    }
}

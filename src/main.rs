//! Mappmarker - a terminal route and delivery browser.
//!
//! Routes can be pinned to the top of the table, and each route's deliveries
//! open in a dialog with search, column settings and row reordering.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use mappmarker::app::App;
use mappmarker::config::{Config, Settings};
use mappmarker::data::MockDataSource;
use mappmarker::error::AppError;
use mappmarker::events::{EventHandler, KeyBindings};
use mappmarker::logging;
use mappmarker::table::TableController;
use mappmarker::ui::load_theme;

/// Command-line arguments. Values given here override the config file.
#[derive(Debug, Parser)]
#[command(name = "mappmarker", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Row count used when regenerating deliveries.
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of routes to generate.
    #[arg(long)]
    routes: Option<usize>,

    /// Seed for generated data.
    #[arg(long)]
    seed: Option<u64>,

    /// UI theme ("dark" or "light").
    #[arg(long)]
    theme: Option<String>,

    /// Write the default config file and exit.
    #[arg(long)]
    write_default_config: bool,
}

impl Cli {
    fn config_path(&self) -> mappmarker::config::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Load the config file, falling back to defaults on error, then apply
    /// the command-line overrides.
    fn settings(&self) -> Result<Settings, AppError> {
        let loaded = self
            .config_path()
            .and_then(|path| Config::load_from(&path));
        let mut settings = match loaded {
            Ok(config) => config.settings,
            Err(e) => {
                let e = AppError::from(e);
                warn!(error = %e, "Failed to load config, using defaults");
                eprintln!("{}", e.user_message());
                Settings::default()
            }
        };

        if let Some(rows) = self.rows {
            settings.initial_row_count = rows;
        }
        if let Some(routes) = self.routes {
            settings.route_count = routes;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(theme) = &self.theme {
            settings.theme = theme.clone();
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = cli.config_path()?;
        Config::default()
            .save_to(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: could not initialize logging: {e:#}");
    }

    let result = run(&cli);
    if let Err(e) = &result {
        if e.is_critical() {
            error!(error = %e, "Application failed");
        } else {
            warn!(error = %e, "Application stopped");
        }
        eprintln!("{}", e.user_message());
    }

    logging::shutdown();
    result.map_err(anyhow::Error::from)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let settings = cli.settings()?;
    logging::log_settings(&settings);
    load_theme(&settings.theme);

    let source = match settings.seed {
        Some(seed) => MockDataSource::seeded(seed),
        None => MockDataSource::new(),
    };
    let table = TableController::new(
        Box::new(source),
        settings.route_count,
        settings.initial_row_count,
    );
    let mut app = App::new(table, KeyBindings::new(settings.vim_mode));
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let _guard = TerminalGuard;
    let mut terminal = setup_terminal()?;
    info!(routes = settings.route_count, "Entering event loop");

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        app.update(events.next()?);
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, AppError> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("enter alternate screen: {e}")))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| AppError::terminal(format!("create terminal: {e}")))
}

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

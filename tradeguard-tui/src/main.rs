//! TradeGuard TUI: interactive stop-loss calculator.
//!
//! Panels:
//! 1. Calculator: entry / current / highest prices with live evaluation
//! 2. Rules: tier reference with the active tier marked
//! 3. Analyzer: strategy screenshot analysis on a background worker
//! 4. Help: keyboard shortcuts

mod app;
mod input;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use tradeguard_core::config::Settings;
use tradeguard_core::logging;

use crate::app::AppState;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_path =
        Settings::default_path().context("no config directory on this platform")?;
    let log_path = log_path_for(&config_path);

    // A broken settings file should not keep the calculator from starting.
    let (settings, settings_error) = match Settings::load_or_default(&config_path) {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e.to_string())),
    };
    let log_error = logging::init_file(&settings.logging.level, &log_path)
        .err()
        .map(|e| e.to_string());
    tracing::info!(config = %config_path.display(), "starting tui");

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx)?;

    let mut app = AppState::new(settings, cmd_tx.clone(), resp_rx);
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "using default settings");
        app.set_warning(format!("Settings not loaded, using defaults: {e}"));
    } else if let Some(e) = log_error {
        app.set_warning(format!("Logging disabled: {e}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shutdown worker. An analysis in flight finishes its request first.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    drop(app);
    let _ = worker_handle.join();

    tracing::info!("tui exited");
    result
}

/// The log file lives next to the settings file.
fn log_path_for(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("tradeguard-tui.log")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_sits_beside_settings() {
        let config = PathBuf::from("/home/user/.config/tradeguard/config.toml");
        assert_eq!(
            log_path_for(&config),
            PathBuf::from("/home/user/.config/tradeguard/tradeguard-tui.log")
        );
    }

    #[test]
    fn default_settings_path_is_shared() {
        if let Some(config) = Settings::default_path() {
            let log = log_path_for(&config);
            assert_eq!(log.parent(), config.parent());
            assert!(log.ends_with("tradeguard/tradeguard-tui.log"));
        }
    }
}

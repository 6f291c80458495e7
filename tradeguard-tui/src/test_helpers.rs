//! Test helpers: app construction, key events, buffer dumps.

use std::sync::mpsc::{self, Receiver, Sender};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use tradeguard_core::config::Settings;

use crate::app::AppState;
use crate::input::handle_key;
use crate::worker::{WorkerCommand, WorkerResponse};

/// App wired to in-memory channels. Keep the returned ends alive for the test.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    (AppState::new(Settings::default(), cmd_tx, resp_rx), cmd_rx, resp_tx)
}

pub fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn type_str(app: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_key(app, press(KeyCode::Char(c)));
    }
}

/// Render the whole UI and return the screen as lines of text.
pub fn render_to_lines(app: &AppState, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

pub fn screen_contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}

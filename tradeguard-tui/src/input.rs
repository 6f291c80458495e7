//! Keyboard input dispatch: global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tradeguard_core::form::Field;

use crate::app::{AppState, Panel};

/// Characters accepted by the price fields.
fn is_price_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys (always available).
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 2. Panel-specific keys.
    match app.active_panel {
        Panel::Calculator => handle_calculator_key(app, key),
        Panel::Analyzer => handle_analyzer_key(app, key),
        Panel::Rules | Panel::Help => {
            if key.code == KeyCode::Char('q') {
                app.running = false;
            }
        }
    }
}

fn handle_calculator_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') => {
            app.form.clear();
            app.focus = Field::Entry;
            app.set_status("Cleared");
        }
        KeyCode::Char(ch) if is_price_char(ch) => app.form.push_char(app.focus, ch),
        KeyCode::Backspace => app.form.pop_char(app.focus),
        KeyCode::Delete => app.form.clear_field(app.focus),
        KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Down | KeyCode::Enter => app.focus = app.focus.next(),
        _ => {}
    }
}

fn handle_analyzer_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Down => app.analyzer.focus = app.analyzer.focus.toggle(),
        KeyCode::Enter => app.start_analysis(),
        KeyCode::Backspace => {
            app.analyzer.focused_text_mut().pop();
        }
        KeyCode::Delete => app.analyzer.focused_text_mut().clear(),
        KeyCode::Char(ch) => app.analyzer.focused_text_mut().push(ch),
        _ => {}
    }
}

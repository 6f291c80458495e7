//! Panel 4, Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "Esc / Ctrl+C", "Quit");
    key(&mut lines, "q", "Quit (except while typing in the Analyzer)");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Calculator");
    key(&mut lines, "↑ / ↓ / Enter", "Move between entry, current, highest");
    key(&mut lines, "0-9 . -", "Type into the focused price");
    key(&mut lines, "Backspace", "Delete last character");
    key(&mut lines, "Delete", "Clear the focused price");
    key(&mut lines, "c", "Clear all prices");
    key(&mut lines, "", "Typing a current price above the highest raises the highest");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Rules");
    key(&mut lines, "", "Tier table; the calculator's tier is marked");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3: Analyzer");
    key(&mut lines, "↑ / ↓", "Switch between image path and API key");
    key(&mut lines, "Enter", "Analyze the image in the background");
    key(&mut lines, "Backspace / Delete", "Delete last character / clear field");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

//! Top-level UI layout: tab line, active panel, status bar.

pub mod analyzer_panel;
pub mod calculator_panel;
pub mod help_panel;
pub mod rules_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Panel};
use crate::theme::{self, Theme};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let background = Block::default().style(Style::default().bg(Theme::default().background));
    f.render_widget(background, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app.active_panel);
    draw_panel(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);
}

fn draw_tabs(f: &mut Frame, area: Rect, active: Panel) {
    let mut spans = vec![Span::styled(" TradeGuard ", theme::accent_bold())];
    for panel in Panel::ALL {
        let style = if panel == active {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", panel.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Calculator => calculator_panel::render(f, inner, app),
        Panel::Rules => rules_panel::render(f, inner, app),
        Panel::Analyzer => analyzer_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Panel;
    use crate::test_helpers::{render_to_lines, screen_contains, test_app};

    #[test]
    fn every_panel_renders_its_title() {
        let (mut app, _rx, _tx) = test_app();
        for panel in Panel::ALL {
            app.active_panel = panel;
            let lines = render_to_lines(&app, 100, 30);
            assert!(
                screen_contains(&lines, &format!(" {} [{}] ", panel.label(), panel.index() + 1)),
                "missing title for {panel:?}"
            );
        }
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (app, _rx, _tx) = test_app();
        let _ = render_to_lines(&app, 10, 4);
    }
}

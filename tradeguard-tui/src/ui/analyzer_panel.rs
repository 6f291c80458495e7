//! Panel 3, Analyzer: send a strategy screenshot for a written summary.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AnalyzerField, AppState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    render_inputs(f, chunks[0], app);
    render_result(f, chunks[1], app);
}

fn input_line<'a>(label: &'static str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, theme::accent()),
        Span::styled(
            format!("{label:<12}"),
            if focused { theme::accent_bold() } else { theme::secondary() },
        ),
        Span::styled(
            value,
            if focused {
                theme::text().add_modifier(Modifier::UNDERLINED)
            } else {
                theme::text()
            },
        ),
    ];
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    Line::from(spans)
}

fn render_inputs(f: &mut Frame, area: Rect, app: &AppState) {
    let a = &app.analyzer;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[↑/↓]field [Enter]analyze [Bksp]delete [Del]clear field",
        theme::muted(),
    )));
    lines.push(Line::from(""));
    lines.push(input_line(
        "Image path",
        a.image_path.clone(),
        a.focus == AnalyzerField::ImagePath,
    ));
    lines.push(input_line(
        "API key",
        a.masked_key(),
        a.focus == AnalyzerField::ApiKey,
    ));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<12}", "Model"), theme::secondary()),
        Span::styled(app.settings.analyzer.model.as_str(), theme::muted()),
    ]));
    if a.api_key.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                "  No key: type one above or set {}",
                app.settings.analyzer.api_key_env
            ),
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_result(f: &mut Frame, area: Rect, app: &AppState) {
    let a = &app.analyzer;
    let title = match a.completed_at {
        Some(at) if !a.in_progress => format!(" Analysis ({}) ", at.format("%H:%M:%S")),
        _ => " Analysis ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(title)
        .title_style(theme::accent());

    let body: Vec<Line> = if a.in_progress {
        vec![Line::from(Span::styled("Analyzing...", theme::warning()))]
    } else if let Some(error) = &a.error {
        vec![Line::from(Span::styled(error.as_str(), theme::negative()))]
    } else if let Some(text) = &a.result {
        text.lines()
            .map(|l| Line::from(Span::styled(l, theme::text())))
            .collect()
    } else {
        vec![Line::from(Span::styled(
            "No analysis yet. Enter an image path and press Enter.",
            theme::muted(),
        ))]
    };

    let para = Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

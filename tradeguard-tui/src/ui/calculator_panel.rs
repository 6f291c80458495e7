//! Panel 1, Calculator: price form, live evaluation, risk/reward bar.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradeguard_core::breakdown::{RiskBreakdown, SegmentKind};
use tradeguard_core::engine::EvaluationResult;
use tradeguard_core::form::{parse_price, Field};

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let t = Theme::default();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[↑/↓]field [0-9 . -]type [Bksp]delete [Del]clear field [c]lear all",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for field in Field::ALL {
        lines.push(field_line(app, field, &t));
    }
    lines.push(Line::from(""));

    match app.evaluation() {
        Some(result) => {
            result_lines(&mut lines, app, &result, &t);
            if let Some(snap) = app.form.snapshot() {
                let breakdown =
                    RiskBreakdown::from_result(snap.entry_price, snap.current_price, &result);
                breakdown_lines(&mut lines, &breakdown, area.width, app.precision(), &t);
            }
        }
        None => {
            let hint = if app.form.snapshot().is_some() {
                "Entry price must be non-zero."
            } else {
                "Enter entry, current and highest prices to evaluate."
            };
            lines.push(Line::from(Span::styled(hint, theme::muted())));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn field_line<'a>(app: &'a AppState, field: Field, t: &Theme) -> Line<'a> {
    let text = app.form.get(field);
    let focused = field == app.focus;
    let invalid = !text.trim().is_empty() && parse_price(text).is_none();

    let marker = if focused { "▸ " } else { "  " };
    let value_style = if invalid {
        Style::default().fg(t.negative)
    } else if focused {
        theme::text().add_modifier(Modifier::UNDERLINED)
    } else {
        theme::text()
    };

    let mut spans = vec![
        Span::styled(marker, theme::accent()),
        Span::styled(
            format!("{:<15}", field.label()),
            if focused { theme::accent_bold() } else { theme::secondary() },
        ),
        Span::styled(text, value_style),
    ];
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    if invalid {
        spans.push(Span::styled("  not a number", theme::negative()));
    }
    Line::from(spans)
}

fn pct(ratio: f64) -> String {
    format!("{:+.2}%", ratio * 100.0)
}

fn result_lines(lines: &mut Vec<Line>, app: &AppState, r: &EvaluationResult, t: &Theme) {
    let p = app.precision();
    let label = |s: &'static str| Span::styled(format!("{s:<15}"), theme::secondary());

    lines.push(Line::from(vec![
        label("Tier"),
        Span::styled(r.tier_label(), Style::default().fg(t.tier_color(r.tier))),
    ]));
    lines.push(Line::from(vec![
        label("Stop price"),
        Span::styled(format!("{:.p$}", r.stop_price), theme::text()),
        Span::styled(
            if r.is_stopped { "  [TRIGGERED]" } else { "  [monitoring]" },
            Style::default().fg(t.stop_color(r.is_stopped)),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Status"),
        Span::styled(
            r.status_label(),
            Style::default()
                .fg(t.stop_color(r.is_stopped))
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Action"),
        Span::styled(r.position_action.label(), theme::accent_bold()),
    ]));
    lines.push(Line::from(vec![
        label("Current P/L"),
        Span::styled(
            pct(r.current_profit_ratio),
            Style::default().fg(t.pnl_color(r.current_profit_ratio)),
        ),
        Span::styled("   peak ", theme::secondary()),
        Span::styled(
            pct(r.max_profit_ratio),
            Style::default().fg(t.pnl_color(r.max_profit_ratio)),
        ),
    ]));
}

/// Split `width` cells among the non-zero segments in proportion to their
/// share. Widths always sum to `width` when any segment is present.
pub fn bar_widths(breakdown: &RiskBreakdown, width: u16) -> Vec<(SegmentKind, u16)> {
    let total = breakdown.total();
    if total <= 0.0 || width == 0 {
        return Vec::new();
    }
    let w = f64::from(width);
    let mut cum = 0.0;
    let mut start = 0u16;
    breakdown
        .segments()
        .into_iter()
        .map(|(kind, value)| {
            cum += value;
            let end = ((cum / total) * w).round().min(w) as u16;
            let cells = end.saturating_sub(start);
            start = end;
            (kind, cells)
        })
        .collect()
}

fn breakdown_lines(
    lines: &mut Vec<Line>,
    breakdown: &RiskBreakdown,
    area_width: u16,
    precision: usize,
    t: &Theme,
) {
    let segments = breakdown.segments();
    if segments.is_empty() {
        return;
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Risk / reward", theme::accent_bold())));

    let bar: Vec<Span> = bar_widths(breakdown, area_width.saturating_sub(2).min(60))
        .into_iter()
        .filter(|(_, cells)| *cells > 0)
        .map(|(kind, cells)| {
            Span::styled(
                "█".repeat(cells as usize),
                Style::default().fg(t.segment_color(kind)),
            )
        })
        .collect();
    lines.push(Line::from(bar));

    let p = precision;
    for (kind, value) in segments {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(t.segment_color(kind))),
            Span::styled(format!("{:<15}", kind.label()), theme::secondary()),
            Span::styled(format!("{value:>12.p$}"), theme::text()),
            Span::styled(
                format!("  {:>5.1}%", breakdown.share(kind) * 100.0),
                theme::muted(),
            ),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{render_to_lines, screen_contains, test_app};
    use tradeguard_core::form::Field;

    #[test]
    fn bar_widths_fill_the_bar() {
        let b = RiskBreakdown::new(100.0, 104.0, 109.0);
        let widths = bar_widths(&b, 40);
        let sum: u16 = widths.iter().map(|(_, w)| w).sum();
        assert_eq!(sum, 40);
        assert_eq!(widths[0].0, SegmentKind::LockedProfit);
    }

    #[test]
    fn bar_widths_empty_breakdown() {
        assert!(bar_widths(&RiskBreakdown::new(0.0, 0.0, 0.0), 40).is_empty());
        assert!(bar_widths(&RiskBreakdown::new(100.0, 104.0, 109.0), 0).is_empty());
    }

    #[test]
    fn shows_awaiting_hint_until_complete() {
        let (app, _rx, _tx) = test_app();
        let lines = render_to_lines(&app, 100, 30);
        assert!(screen_contains(&lines, "Enter entry, current and highest prices"));
    }

    #[test]
    fn zero_entry_hint() {
        let (mut app, _rx, _tx) = test_app();
        app.form.set_field(Field::Entry, "0");
        app.form.set_field(Field::Current, "10");
        let lines = render_to_lines(&app, 100, 30);
        assert!(screen_contains(&lines, "Entry price must be non-zero."));
    }

    #[test]
    fn renders_triggered_stop() {
        let (mut app, _rx, _tx) = test_app();
        app.form.set_field(Field::Entry, "100");
        app.form.set_field(Field::Current, "104");
        app.form.set_field(Field::Highest, "118");
        let lines = render_to_lines(&app, 100, 30);
        assert!(screen_contains(&lines, "Growth zone (10% - 20%)"));
        assert!(screen_contains(&lines, "109.00  [TRIGGERED]"));
        assert!(screen_contains(&lines, "STOP LOSS TRIGGERED"));
        assert!(screen_contains(&lines, "Sell all (100%)"));
        assert!(screen_contains(&lines, "Risk / reward"));
    }

    #[test]
    fn flags_invalid_field() {
        let (mut app, _rx, _tx) = test_app();
        app.form.set_field(Field::Entry, "1..2");
        let lines = render_to_lines(&app, 100, 30);
        assert!(screen_contains(&lines, "not a number"));
    }
}

//! Panel 2, Rules: the four tiers and the position-sizing rule.
//!
//! The tier the calculator currently sits in is highlighted.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradeguard_core::engine::PositionAction;
use tradeguard_core::tier::TierKind;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let t = Theme::default();
    let active = app.evaluation().map(|r| r.tier);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Stop-loss tiers, selected by the highest price since entry",
        theme::accent_bold(),
    )));
    lines.push(Line::from(""));

    for kind in TierKind::ALL {
        let is_active = active == Some(kind);
        let marker = if is_active { "▸ " } else { "  " };
        let mut label_style = Style::default().fg(t.tier_color(kind));
        if is_active {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<20}", kind.range_text()), theme::secondary()),
            Span::styled(kind.label(), label_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(22)),
            Span::styled(kind.rule_text(), theme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Position sizing", theme::accent_bold())));
    for (when, action) in [
        ("stop triggered", PositionAction::SellAll),
        ("peak profit >= 10%", PositionAction::TakeHalf),
        ("otherwise", PositionAction::HoldFull),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {when:<20}"), theme::secondary()),
            Span::styled(action.label(), theme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tiers are chosen by the highest price; a higher peak never lowers the stop.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use crate::app::Panel;
    use crate::test_helpers::{render_to_lines, screen_contains, test_app};
    use tradeguard_core::form::Field;
    use tradeguard_core::tier::TierKind;

    #[test]
    fn lists_every_tier() {
        let (mut app, _rx, _tx) = test_app();
        app.active_panel = Panel::Rules;
        let lines = render_to_lines(&app, 110, 30);
        for kind in TierKind::ALL {
            assert!(screen_contains(&lines, kind.label()), "{kind:?}");
        }
        assert!(screen_contains(&lines, "Take half profit (50%), hold the rest"));
    }

    #[test]
    fn marks_the_active_tier() {
        let (mut app, _rx, _tx) = test_app();
        app.active_panel = Panel::Rules;
        app.form.set_field(Field::Entry, "100");
        app.form.set_field(Field::Current, "130");
        let lines = render_to_lines(&app, 110, 30);
        let row = lines
            .iter()
            .find(|l| l.contains(TierKind::HighProfit.label()))
            .unwrap();
        assert!(row.contains('▸'));
    }

    #[test]
    fn active_tier_follows_a_lowered_highest() {
        let (mut app, _rx, _tx) = test_app();
        app.active_panel = Panel::Rules;
        app.form.set_field(Field::Entry, "100");
        app.form.set_field(Field::Current, "130");
        app.form.set_field(Field::Highest, "106");
        let lines = render_to_lines(&app, 110, 30);
        let row = lines
            .iter()
            .find(|l| l.contains(TierKind::Breakeven.label()))
            .unwrap();
        assert!(row.contains('▸'));
        assert!(!screen_contains(&lines, "only moves up"));
    }
}

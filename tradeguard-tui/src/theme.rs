//! Color theme for the TradeGuard TUI.
//!
//! Neon accents on a dark background:
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (profit, monitoring)
//! - **Negative**: hot pink (losses, triggered stops)
//! - **Warning**: neon orange (alerts, risk exposure)
//! - **Neutral**: cool purple (principal, secondary info)
//! - **Muted**: steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use tradeguard_core::breakdown::SegmentKind;
use tradeguard_core::tier::TierKind;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Profit ratio color (zero counts as positive).
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Tiers get warmer the less room the stop leaves.
    pub fn tier_color(&self, tier: TierKind) -> Color {
        match tier {
            TierKind::Accumulation => self.warning,
            TierKind::Breakeven => self.neutral,
            TierKind::Growth => self.accent,
            TierKind::HighProfit => self.positive,
        }
    }

    pub fn stop_color(&self, is_stopped: bool) -> Color {
        if is_stopped {
            self.negative
        } else {
            self.positive
        }
    }

    pub fn segment_color(&self, kind: SegmentKind) -> Color {
        match kind {
            SegmentKind::LockedProfit => self.positive,
            SegmentKind::Principal => self.neutral,
            SegmentKind::RiskExposure => self.warning,
            SegmentKind::OpenProfit => self.accent,
        }
    }
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

pub fn accent() -> Style {
    fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    fg(Theme::default().muted)
}

pub fn text() -> Style {
    fg(Theme::default().text_primary)
}

pub fn secondary() -> Style {
    fg(Theme::default().text_secondary)
}

pub fn warning() -> Style {
    fg(Theme::default().warning)
}

pub fn negative() -> Style {
    fg(Theme::default().negative)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

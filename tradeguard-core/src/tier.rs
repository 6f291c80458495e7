//! Profit tiers: the fixed rule table behind the stop-loss engine.
//!
//! Tiers partition the high-water-mark profit ratio into four contiguous,
//! lower-inclusive intervals:
//!
//! | Tier           | Profit ratio      | Stop price                               |
//! |----------------|-------------------|------------------------------------------|
//! | `Accumulation` | `< 5%`            | `entry × 0.95`                           |
//! | `Breakeven`    | `[5%, 10%)`       | `entry × 1.015` above 7%, else `× 1.005` |
//! | `Growth`       | `[10%, 20%)`      | `entry + 50%` of peak profit             |
//! | `HighProfit`   | `≥ 20%`           | `entry + 70%` of peak profit             |
//!
//! The formula is chosen by dispatching on [`TierKind`]; the table itself is
//! plain data and serializes as such.

use serde::{Deserialize, Serialize};

/// Flat hard stop below entry for trades that never reached 5%.
pub const HARD_STOP_FACTOR: f64 = 0.95;

/// Peak profit above which the breakeven tier locks a small profit.
pub const SMALL_LOCK_THRESHOLD: f64 = 0.07;

/// Breakeven stop, 0.5% above entry.
pub const BREAKEVEN_FACTOR: f64 = 1.005;

/// Breakeven stop once peak profit passed [`SMALL_LOCK_THRESHOLD`].
pub const SMALL_LOCK_FACTOR: f64 = 1.015;

/// Share of peak profit kept by the growth tier.
pub const GROWTH_KEEP_FRACTION: f64 = 0.50;

/// Share of peak profit kept by the high-profit tier.
pub const HIGH_PROFIT_KEEP_FRACTION: f64 = 0.70;

/// Tier boundaries on the high-water-mark profit ratio.
pub const BREAKEVEN_MIN_RATIO: f64 = 0.05;
pub const GROWTH_MIN_RATIO: f64 = 0.10;
pub const HIGH_PROFIT_MIN_RATIO: f64 = 0.20;

/// The four tier kinds, in ascending profit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    /// Profit below 5%: accumulation / risk zone.
    Accumulation,
    /// Profit in `[5%, 10%)`: move the stop to breakeven.
    Breakeven,
    /// Profit in `[10%, 20%)`: give back at most half of the peak profit.
    Growth,
    /// Profit of 20% or more: give back at most 30% of the peak profit.
    HighProfit,
}

impl TierKind {
    /// All tiers, lowest first.
    pub const ALL: [TierKind; 4] = [
        TierKind::Accumulation,
        TierKind::Breakeven,
        TierKind::Growth,
        TierKind::HighProfit,
    ];

    pub fn index(self) -> usize {
        match self {
            TierKind::Accumulation => 0,
            TierKind::Breakeven => 1,
            TierKind::Growth => 2,
            TierKind::HighProfit => 3,
        }
    }

    /// The table row for this tier.
    pub fn rule(self) -> &'static TierRule {
        &TIERS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.rule().label
    }

    /// Human-readable interval, e.g. `5% ≤ profit < 10%`.
    pub fn range_text(self) -> &'static str {
        match self {
            TierKind::Accumulation => "profit < 5%",
            TierKind::Breakeven => "5% ≤ profit < 10%",
            TierKind::Growth => "10% ≤ profit < 20%",
            TierKind::HighProfit => "profit ≥ 20%",
        }
    }

    /// Plain-language rule for the reference panel.
    pub fn rule_text(self) -> &'static str {
        match self {
            TierKind::Accumulation => "Hard stop: 5% below entry.",
            TierKind::Breakeven => {
                "Move stop to breakeven (+0.5%); lock +1.5% once peak profit passes 7%."
            }
            TierKind::Growth => {
                "Take profit. Give back half of the peak profit (stop = entry + 50% of peak gain)."
            }
            TierKind::HighProfit => {
                "Take profit. Give back 30% of the peak profit (stop = entry + 70% of peak gain)."
            }
        }
    }

    /// Stop price for a trade whose high-water-mark falls in this tier.
    ///
    /// The 5–10% tier is a step function at 7%, not an interpolation.
    pub fn stop_price(self, entry_price: f64, highest_price: f64) -> f64 {
        let peak_gain = highest_price - entry_price;
        match self {
            TierKind::Accumulation => entry_price * HARD_STOP_FACTOR,
            TierKind::Breakeven => {
                let peak_ratio = peak_gain / entry_price;
                if peak_ratio > SMALL_LOCK_THRESHOLD {
                    entry_price * SMALL_LOCK_FACTOR
                } else {
                    entry_price * BREAKEVEN_FACTOR
                }
            }
            TierKind::Growth => entry_price + peak_gain * GROWTH_KEEP_FRACTION,
            TierKind::HighProfit => entry_price + peak_gain * HIGH_PROFIT_KEEP_FRACTION,
        }
    }
}

impl std::fmt::Display for TierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierRule {
    pub kind: TierKind,
    /// Inclusive lower bound on the high-water-mark profit ratio.
    pub min_profit_ratio: f64,
    /// Exclusive upper bound; `None` means unbounded.
    pub max_profit_ratio: Option<f64>,
    pub label: &'static str,
}

impl TierRule {
    /// Whether `ratio` falls in `[min, max)`.
    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min_profit_ratio && self.max_profit_ratio.map_or(true, |max| ratio < max)
    }
}

/// The tier table, lowest tier first. Contiguous and exhaustive over `(-∞, +∞)`.
pub const TIERS: [TierRule; 4] = [
    TierRule {
        kind: TierKind::Accumulation,
        min_profit_ratio: f64::NEG_INFINITY,
        max_profit_ratio: Some(BREAKEVEN_MIN_RATIO),
        label: "Accumulation / risk zone (<5%)",
    },
    TierRule {
        kind: TierKind::Breakeven,
        min_profit_ratio: BREAKEVEN_MIN_RATIO,
        max_profit_ratio: Some(GROWTH_MIN_RATIO),
        label: "Breakeven zone (5% - 10%)",
    },
    TierRule {
        kind: TierKind::Growth,
        min_profit_ratio: GROWTH_MIN_RATIO,
        max_profit_ratio: Some(HIGH_PROFIT_MIN_RATIO),
        label: "Growth zone (10% - 20%)",
    },
    TierRule {
        kind: TierKind::HighProfit,
        min_profit_ratio: HIGH_PROFIT_MIN_RATIO,
        max_profit_ratio: None,
        label: "High-profit zone (>20%)",
    },
];

/// Find the tier containing `profit_ratio`.
///
/// Returns `None` only for NaN; every other value, infinities included,
/// lands in exactly one tier.
pub fn select_tier(profit_ratio: f64) -> Option<&'static TierRule> {
    TIERS.iter().find(|rule| rule.contains(profit_ratio))
}

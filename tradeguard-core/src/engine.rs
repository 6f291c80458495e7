//! Stop-loss tier engine.
//!
//! `evaluate` maps (entry, current, highest) to a stop price, a stop-breach
//! flag, a status label and a position-sizing action. Tier selection uses the
//! high-water-mark profit ratio, never the current one: once a tier has been
//! reached its formula keeps applying through a retracement.
//!
//! The engine is pure. It does no validation beyond the finite / non-zero
//! entry guard, does not log, and never panics.

use serde::{Deserialize, Serialize};

use crate::tier::{select_tier, TierKind, GROWTH_MIN_RATIO};

/// Peak profit ratio from which half the position should be realized.
pub const TAKE_HALF_THRESHOLD: f64 = GROWTH_MIN_RATIO;

/// Position-sizing recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionAction {
    /// Keep 100% of the position.
    HoldFull,
    /// Realize half the position, keep the rest running.
    TakeHalf,
    /// Exit the whole position.
    SellAll,
}

impl PositionAction {
    pub fn label(self) -> &'static str {
        match self {
            PositionAction::HoldFull => "Hold full position (100%)",
            PositionAction::TakeHalf => "Take half profit (50%), hold the rest",
            PositionAction::SellAll => "Sell all (100%)",
        }
    }

    /// Fraction of the position to sell.
    pub fn sell_fraction(self) -> f64 {
        match self {
            PositionAction::HoldFull => 0.0,
            PositionAction::TakeHalf => 0.5,
            PositionAction::SellAll => 1.0,
        }
    }
}

impl std::fmt::Display for PositionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Status classification shown next to the stop price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    /// The matched tier's own label.
    Tier(TierKind),
    /// Current price is below the stop.
    StopTriggered,
}

impl StatusLabel {
    pub fn label(self) -> &'static str {
        match self {
            StatusLabel::Tier(kind) => kind.label(),
            StatusLabel::StopTriggered => "STOP LOSS TRIGGERED",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three prices of an open trade at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSnapshot {
    pub entry_price: f64,
    pub current_price: f64,
    /// Highest price since entry. Taken as given, even when below current.
    pub highest_price: f64,
}

impl TradeSnapshot {
    pub fn new(entry_price: f64, current_price: f64, highest_price: f64) -> Self {
        Self {
            entry_price,
            current_price,
            highest_price,
        }
    }

    pub fn evaluate(&self) -> Option<EvaluationResult> {
        evaluate(self.entry_price, self.current_price, self.highest_price)
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub stop_price: f64,
    /// `current_price < stop_price`.
    pub is_stopped: bool,
    pub tier: TierKind,
    pub status: StatusLabel,
    pub current_profit_ratio: f64,
    pub max_profit_ratio: f64,
    pub position_action: PositionAction,
}

impl EvaluationResult {
    pub fn tier_label(&self) -> &'static str {
        self.tier.label()
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// Evaluate a trade.
///
/// Returns `None` when any input is not finite or `entry_price == 0`; that
/// means "awaiting input", not a failure.
///
/// # Example
/// ```
/// use tradeguard_core::engine::{evaluate, PositionAction};
/// use tradeguard_core::tier::TierKind;
///
/// let result = evaluate(100.0, 130.0, 130.0).unwrap();
/// assert_eq!(result.tier, TierKind::HighProfit);
/// assert!((result.stop_price - 121.0).abs() < 1e-9);
/// assert!(!result.is_stopped);
/// assert_eq!(result.position_action, PositionAction::TakeHalf);
///
/// assert!(evaluate(0.0, 10.0, 10.0).is_none());
/// ```
pub fn evaluate(
    entry_price: f64,
    current_price: f64,
    highest_price: f64,
) -> Option<EvaluationResult> {
    if !entry_price.is_finite() || !current_price.is_finite() || !highest_price.is_finite() {
        return None;
    }
    if entry_price == 0.0 {
        return None;
    }

    let current_profit_ratio = (current_price - entry_price) / entry_price;
    let max_profit_ratio = (highest_price - entry_price) / entry_price;

    let tier = select_tier(max_profit_ratio)?.kind;
    let stop_price = tier.stop_price(entry_price, highest_price);
    let is_stopped = current_price < stop_price;

    let position_action = if is_stopped {
        PositionAction::SellAll
    } else if max_profit_ratio >= TAKE_HALF_THRESHOLD {
        PositionAction::TakeHalf
    } else {
        PositionAction::HoldFull
    };

    let status = if is_stopped {
        StatusLabel::StopTriggered
    } else {
        StatusLabel::Tier(tier)
    };

    Some(EvaluationResult {
        stop_price,
        is_stopped,
        tier,
        status,
        current_profit_ratio,
        max_profit_ratio,
        position_action,
    })
}

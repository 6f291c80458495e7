//! Risk / reward breakdown for proportional display.
//!
//! Splits a trade into four non-negative magnitudes relative to the stop:
//! profit already locked by the stop, principal still protected, principal
//! exposed below entry, and open profit above the stop.

use serde::Serialize;

use crate::engine::EvaluationResult;

/// One segment of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    LockedProfit,
    Principal,
    RiskExposure,
    OpenProfit,
}

impl SegmentKind {
    /// Display order.
    pub const ALL: [SegmentKind; 4] = [
        SegmentKind::LockedProfit,
        SegmentKind::Principal,
        SegmentKind::RiskExposure,
        SegmentKind::OpenProfit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::LockedProfit => "Locked profit",
            SegmentKind::Principal => "Principal",
            SegmentKind::RiskExposure => "Risk exposure",
            SegmentKind::OpenProfit => "Open profit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub locked_profit: f64,
    pub principal: f64,
    pub risk_exposure: f64,
    pub open_profit: f64,
}

impl RiskBreakdown {
    /// Derive the breakdown from prices and an evaluated stop.
    pub fn new(entry_price: f64, current_price: f64, stop_price: f64) -> Self {
        let locked_profit = (stop_price - entry_price).max(0.0);
        let risk_exposure = (entry_price - stop_price).max(0.0);
        let open_profit = (current_price - stop_price).max(0.0);
        let principal = (entry_price - risk_exposure).max(0.0);
        Self {
            locked_profit,
            principal,
            risk_exposure,
            open_profit,
        }
    }

    pub fn from_result(entry_price: f64, current_price: f64, result: &EvaluationResult) -> Self {
        Self::new(entry_price, current_price, result.stop_price)
    }

    pub fn value(&self, kind: SegmentKind) -> f64 {
        match kind {
            SegmentKind::LockedProfit => self.locked_profit,
            SegmentKind::Principal => self.principal,
            SegmentKind::RiskExposure => self.risk_exposure,
            SegmentKind::OpenProfit => self.open_profit,
        }
    }

    /// Non-zero segments in display order.
    pub fn segments(&self) -> Vec<(SegmentKind, f64)> {
        SegmentKind::ALL
            .iter()
            .map(|&kind| (kind, self.value(kind)))
            .filter(|&(_, value)| value > 0.0)
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.segments().iter().map(|(_, v)| v).sum()
    }

    /// Share of the total taken by `kind`, in `[0, 1]`. Zero when the total is zero.
    pub fn share(&self, kind: SegmentKind) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.value(kind).max(0.0) / total
        } else {
            0.0
        }
    }
}

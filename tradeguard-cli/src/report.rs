//! Text and JSON rendering of evaluations and the tier reference.

use serde::Serialize;

use tradeguard_core::breakdown::RiskBreakdown;
use tradeguard_core::engine::{EvaluationResult, TradeSnapshot};
use tradeguard_core::tier::{TierKind, TierRule, TIERS};

/// Everything `eval --json` prints.
#[derive(Debug, Serialize)]
pub struct EvalReport {
    pub snapshot: TradeSnapshot,
    pub result: EvaluationResult,
    pub tier_label: &'static str,
    pub status_label: &'static str,
    pub action_label: &'static str,
    pub breakdown: RiskBreakdown,
}

impl EvalReport {
    pub fn new(snapshot: TradeSnapshot, result: EvaluationResult) -> Self {
        Self {
            snapshot,
            result,
            tier_label: result.tier_label(),
            status_label: result.status_label(),
            action_label: result.position_action.label(),
            breakdown: RiskBreakdown::from_result(
                snapshot.entry_price,
                snapshot.current_price,
                &result,
            ),
        }
    }
}

/// One line of `watch --json` output.
#[derive(Debug, Serialize)]
pub struct TickReport {
    pub line: usize,
    pub price: f64,
    pub highest_price: f64,
    pub result: Option<EvaluationResult>,
}

/// One row of `tiers --json` output.
#[derive(Debug, Serialize)]
pub struct TierReport {
    #[serde(flatten)]
    pub rule: TierRule,
    pub range: &'static str,
    pub rule_text: &'static str,
}

pub fn tier_reports() -> Vec<TierReport> {
    TIERS
        .iter()
        .map(|rule| TierReport {
            rule: *rule,
            range: rule.kind.range_text(),
            rule_text: rule.kind.rule_text(),
        })
        .collect()
}

/// Signed percentage with two decimals, e.g. `+18.00%`.
pub fn pct(ratio: f64) -> String {
    format!("{:+.2}%", ratio * 100.0)
}

pub fn format_evaluation(
    snapshot: &TradeSnapshot,
    result: &EvaluationResult,
    precision: usize,
) -> String {
    let p = precision;
    let breakdown =
        RiskBreakdown::from_result(snapshot.entry_price, snapshot.current_price, result);
    let flag = if result.is_stopped { "TRIGGERED" } else { "monitoring" };

    let mut lines = vec![
        format!("{:<12} {:.p$}", "Entry", snapshot.entry_price),
        format!(
            "{:<12} {:.p$}  ({})",
            "Current",
            snapshot.current_price,
            pct(result.current_profit_ratio)
        ),
        format!(
            "{:<12} {:.p$}  ({})",
            "Highest",
            snapshot.highest_price,
            pct(result.max_profit_ratio)
        ),
        format!("{:<12} {}", "Tier", result.tier_label()),
        format!("{:<12} {:.p$}  [{flag}]", "Stop price", result.stop_price),
        format!("{:<12} {}", "Status", result.status_label()),
        format!("{:<12} {}", "Action", result.position_action.label()),
    ];

    let segments = breakdown.segments();
    if !segments.is_empty() {
        lines.push(String::new());
        lines.push("Risk / reward".to_string());
        lines.extend(segments.into_iter().map(|(kind, value)| {
            format!(
                "  {:<14} {:>12.p$}  {:>6.1}%",
                kind.label(),
                value,
                breakdown.share(kind) * 100.0
            )
        }));
    }
    lines.join("\n") + "\n"
}

/// One-line summary for the `watch` stream.
pub fn format_tick(
    price: f64,
    highest: f64,
    result: Option<&EvaluationResult>,
    precision: usize,
) -> String {
    let p = precision;
    match result {
        Some(r) => format!(
            "price {price:.p$}  high {highest:.p$}  stop {:.p$}  {}  {}  -> {}",
            r.stop_price,
            pct(r.current_profit_ratio),
            r.status_label(),
            r.position_action.label()
        ),
        None => format!("price {price:.p$}  high {highest:.p$}  awaiting valid input"),
    }
}

pub fn format_tiers() -> String {
    let mut lines = vec![
        "Stop-loss tiers (selected by the highest price since entry)".to_string(),
        "-".repeat(60),
    ];
    for kind in TierKind::ALL {
        lines.push(format!("{:<20} {}", kind.range_text(), kind.label()));
        lines.push(format!("{:<20} {}", "", kind.rule_text()));
    }
    lines.push(String::new());
    lines.push(
        "Position sizing: sell all once the stop triggers; take half once peak profit reaches 10%."
            .to_string(),
    );
    lines.join("\n") + "\n"
}

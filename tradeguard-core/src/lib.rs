//! TradeGuard Core: tiered stop-loss engine and its collaborators.
//!
//! This crate contains:
//! - The tier table and the pure `evaluate` engine (stop price, breach flag,
//!   status label, position-sizing action)
//! - The input form that parses raw text and tracks the high-water-mark
//! - The risk / reward breakdown used for proportional charts
//! - Settings, logging setup and the independent image analyzer client

pub mod analysis;
pub mod breakdown;
pub mod config;
pub mod engine;
pub mod form;
pub mod logging;
pub mod tier;
pub mod watermark;

pub use breakdown::{RiskBreakdown, SegmentKind};
pub use engine::{evaluate, EvaluationResult, PositionAction, StatusLabel, TradeSnapshot};
pub use form::{Field, TradeForm};
pub use tier::{select_tier, TierKind, TierRule, TIERS};
pub use watermark::HighWaterMark;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: value types can cross to the TUI worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<EvaluationResult>();
        require_sync::<EvaluationResult>();
        require_send::<TradeForm>();
        require_sync::<TradeForm>();
        require_send::<RiskBreakdown>();
        require_sync::<RiskBreakdown>();
        require_send::<config::Settings>();
        require_sync::<config::Settings>();
        require_send::<analysis::ImageInput>();
        require_sync::<analysis::ImageInput>();
        require_send::<analysis::GeminiAnalyzer>();
        require_sync::<analysis::GeminiAnalyzer>();
    }

    /// The engine is reachable from the crate root.
    #[test]
    fn root_reexports_evaluate() {
        let result = evaluate(100.0, 103.0, 103.0).expect("valid input");
        assert_eq!(result.tier, TierKind::Accumulation);
    }
}

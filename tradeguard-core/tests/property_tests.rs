//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Partition: exactly one tier matches any finite profit ratio
//! 2. Stop flag: `is_stopped` iff current < stop
//! 3. Monotonicity: raising the high never lowers the stop (entry > 0)
//! 4. Determinism and the "no result" guard

use proptest::prelude::*;
use tradeguard_core::engine::{evaluate, PositionAction, StatusLabel};
use tradeguard_core::tier::{select_tier, TierKind, TIERS};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_entry() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_ratio() -> impl Strategy<Value = f64> {
    -2.0..3.0_f64
}

fn arb_any_price() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6_f64
}

// ── 1. Partition ─────────────────────────────────────────────────────

proptest! {
    /// Exactly one tier contains any finite ratio.
    #[test]
    fn exactly_one_tier_matches(ratio in -1.0e12..1.0e12_f64) {
        let matches = TIERS.iter().filter(|t| t.contains(ratio)).count();
        prop_assert_eq!(matches, 1);
    }

    /// The engine's tier is the one whose interval holds the peak ratio.
    #[test]
    fn tier_follows_high_water_mark(
        entry in arb_entry(),
        peak in arb_ratio(),
        drawdown in 0.0..1.0_f64,
    ) {
        let high = entry * (1.0 + peak);
        let current = high - drawdown * entry;
        let r = evaluate(entry, current, high).unwrap();
        let expected = select_tier(r.max_profit_ratio).unwrap().kind;
        prop_assert_eq!(r.tier, expected);
    }
}

// ── 2. Stop flag and action ──────────────────────────────────────────

proptest! {
    #[test]
    fn stopped_iff_current_below_stop(
        entry in arb_any_price(),
        current in arb_any_price(),
        high in arb_any_price(),
    ) {
        if let Some(r) = evaluate(entry, current, high) {
            prop_assert_eq!(r.is_stopped, current < r.stop_price);
            prop_assert_eq!(r.is_stopped, r.position_action == PositionAction::SellAll);
            prop_assert_eq!(r.is_stopped, r.status == StatusLabel::StopTriggered);
        }
    }

    #[test]
    fn take_half_only_above_ten_percent(
        entry in arb_entry(),
        current_ratio in arb_ratio(),
        peak in arb_ratio(),
    ) {
        let r = evaluate(entry, entry * (1.0 + current_ratio), entry * (1.0 + peak)).unwrap();
        if r.position_action == PositionAction::TakeHalf {
            prop_assert!(r.max_profit_ratio >= 0.10);
            prop_assert!(!r.is_stopped);
        }
        if !r.is_stopped && r.max_profit_ratio >= 0.10 {
            prop_assert_eq!(r.position_action, PositionAction::TakeHalf);
        }
    }
}

// ── 3. Monotonicity ──────────────────────────────────────────────────

proptest! {
    /// For a fixed positive entry, a higher high never yields a lower stop,
    /// within a tier or across an upward boundary.
    #[test]
    fn stop_non_decreasing_in_high(
        entry in arb_entry(),
        a in arb_ratio(),
        b in arb_ratio(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low_stop = evaluate(entry, entry, entry * (1.0 + lo)).unwrap().stop_price;
        let high_stop = evaluate(entry, entry, entry * (1.0 + hi)).unwrap().stop_price;
        prop_assert!(high_stop >= low_stop - 1e-9 * entry);
    }

    /// A rising price path only ever moves to the same or a higher tier.
    #[test]
    fn tiers_never_step_down_on_rising_path(entry in arb_entry(), steps in 1usize..60) {
        let mut last = TierKind::Accumulation;
        for i in 0..steps {
            let high = entry * (1.0 + i as f64 * 0.01);
            let r = evaluate(entry, high, high).unwrap();
            prop_assert!(r.tier >= last);
            last = r.tier;
        }
    }
}

// ── 4. Determinism and guard ─────────────────────────────────────────

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        entry in arb_any_price(),
        current in arb_any_price(),
        high in arb_any_price(),
    ) {
        prop_assert_eq!(evaluate(entry, current, high), evaluate(entry, current, high));
    }

    #[test]
    fn zero_entry_never_evaluates(current in arb_any_price(), high in arb_any_price()) {
        prop_assert!(evaluate(0.0, current, high).is_none());
    }

    #[test]
    fn non_finite_input_never_evaluates(
        entry in arb_any_price(),
        bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
        slot in 0usize..3,
    ) {
        let mut prices = [entry, entry, entry];
        prices[slot] = bad;
        prop_assert!(evaluate(prices[0], prices[1], prices[2]).is_none());
    }
}

//! `watch`: evaluate a stream of prices, one per input line.
//!
//! The high-water-mark is tracked across lines; every line is evaluated
//! independently against it.

use std::io::{BufRead, Write};

use anyhow::Result;
use tradeguard_core::engine::evaluate;
use tradeguard_core::form::parse_price;
use tradeguard_core::watermark::HighWaterMark;

use crate::report::{format_tick, TickReport};

/// Counters reported when the stream ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchSummary {
    pub evaluated: usize,
    pub skipped: usize,
    pub stop_triggers: usize,
}

pub struct WatchOptions {
    pub entry_price: f64,
    pub initial_high: Option<f64>,
    pub json: bool,
    pub precision: usize,
}

pub fn run_watch<R: BufRead, W: Write, E: Write>(
    opts: &WatchOptions,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<WatchSummary> {
    let mut hwm = opts
        .initial_high
        .map(HighWaterMark::with_initial)
        .unwrap_or_default();
    let mut summary = WatchSummary::default();
    let mut was_stopped = false;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(price) = parse_price(trimmed) else {
            writeln!(err, "line {line_no}: not a price: {trimmed:?}")?;
            summary.skipped += 1;
            continue;
        };

        let highest = hwm.observe(price).unwrap_or(price);
        let result = evaluate(opts.entry_price, price, highest);
        summary.evaluated += 1;

        let stopped = result.map_or(false, |r| r.is_stopped);
        if stopped && !was_stopped {
            summary.stop_triggers += 1;
            tracing::info!(line = line_no, price, "stop triggered");
        }
        was_stopped = stopped;

        if opts.json {
            let tick = TickReport {
                line: line_no,
                price,
                highest_price: highest,
                result,
            };
            writeln!(out, "{}", serde_json::to_string(&tick)?)?;
        } else {
            writeln!(
                out,
                "{}",
                format_tick(price, highest, result.as_ref(), opts.precision)
            )?;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn opts(json: bool) -> WatchOptions {
        WatchOptions {
            entry_price: 100.0,
            initial_high: None,
            json,
            precision: 2,
        }
    }

    fn run(opts: &WatchOptions, input: &str) -> (WatchSummary, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run_watch(opts, Cursor::new(input), &mut out, &mut err).unwrap();
        (
            summary,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn tracks_high_across_lines() {
        let (summary, out, err) = run(&opts(false), "102\n112\n125\n119\n116\n");
        assert_eq!(summary.evaluated, 5);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.stop_triggers, 1);
        assert!(err.is_empty());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("high 125.00"));
        assert!(lines[3].contains("stop 117.50"));
        assert!(lines[4].contains("STOP LOSS TRIGGERED"));
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (summary, out, err) = run(&opts(false), "101\nabc\n\n# comment\n103\n");
        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.skipped, 1);
        assert!(err.contains("line 2"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn initial_high_seeds_the_mark() {
        let o = WatchOptions {
            initial_high: Some(118.0),
            ..opts(false)
        };
        let (summary, out, _) = run(&o, "104\n");
        assert_eq!(summary.stop_triggers, 1);
        assert!(out.contains("high 118.00"));
        assert!(out.contains("stop 109.00"));
    }

    #[test]
    fn json_lines() {
        let (_, out, _) = run(&opts(true), "130\n");
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["line"], 1);
        assert_eq!(v["highest_price"], 130.0);
        assert_eq!(v["result"]["position_action"], "take_half");
    }

    #[test]
    fn zero_entry_prints_awaiting() {
        let o = WatchOptions {
            entry_price: 0.0,
            ..opts(false)
        };
        let (summary, out, _) = run(&o, "5\n");
        assert_eq!(summary.evaluated, 1);
        assert!(out.contains("awaiting valid input"));
    }

    #[test]
    fn repeated_stopped_lines_count_once() {
        let o = WatchOptions {
            initial_high: Some(118.0),
            ..opts(false)
        };
        let (summary, _, _) = run(&o, "104\n103\n110\n104\n");
        // Stopped, still stopped, recovered above 109, stopped again.
        assert_eq!(summary.stop_triggers, 2);
    }
}

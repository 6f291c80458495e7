//! Trade input form: three raw text fields and their parsing.
//!
//! Fields hold exactly what the user typed. Every edit of the current price
//! re-checks the high-water-mark: if current now parses above the highest
//! field (or highest is empty / unparseable), highest is replaced with the
//! current field's text.

use serde::{Deserialize, Serialize};

use crate::engine::{self, EvaluationResult, TradeSnapshot};
use crate::watermark::HighWaterMark;

/// One of the three form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Entry,
    Current,
    Highest,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Entry, Field::Current, Field::Highest];

    pub fn label(self) -> &'static str {
        match self {
            Field::Entry => "Entry price",
            Field::Current => "Current price",
            Field::Highest => "Highest price",
        }
    }

    pub fn next(self) -> Field {
        match self {
            Field::Entry => Field::Current,
            Field::Current => Field::Highest,
            Field::Highest => Field::Entry,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Entry => Field::Highest,
            Field::Current => Field::Entry,
            Field::Highest => Field::Current,
        }
    }
}

/// Parse a price field.
///
/// Surrounding whitespace is ignored. Empty, unparseable and non-finite
/// text all yield `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Raw form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeForm {
    pub entry: String,
    pub current: String,
    pub highest: String,
}

impl TradeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Entry => &self.entry,
            Field::Current => &self.current,
            Field::Highest => &self.highest,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Entry => &mut self.entry,
            Field::Current => &mut self.current,
            Field::Highest => &mut self.highest,
        }
    }

    /// Replace a field's text.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) {
        *self.get_mut(field) = text.into();
        self.after_edit(field);
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.get_mut(field).push(c);
        self.after_edit(field);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.get_mut(field).pop();
        self.after_edit(field);
    }

    pub fn clear_field(&mut self, field: Field) {
        self.get_mut(field).clear();
        self.after_edit(field);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn after_edit(&mut self, field: Field) {
        if field == Field::Current {
            self.raise_highest();
        }
    }

    fn raise_highest(&mut self) {
        let Some(current) = parse_price(&self.current) else {
            return;
        };
        let mark = parse_price(&self.highest)
            .map(HighWaterMark::with_initial)
            .unwrap_or_default();
        if mark.would_raise(current) {
            self.highest = self.current.clone();
        }
    }

    /// Parse all three fields.
    pub fn snapshot(&self) -> Option<TradeSnapshot> {
        Some(TradeSnapshot::new(
            parse_price(&self.entry)?,
            parse_price(&self.current)?,
            parse_price(&self.highest)?,
        ))
    }

    /// Evaluate the form; `None` while input is incomplete or invalid.
    pub fn evaluate(&self) -> Option<EvaluationResult> {
        let snap = self.snapshot()?;
        engine::evaluate(snap.entry_price, snap.current_price, snap.highest_price)
    }
}

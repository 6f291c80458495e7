//! High-water-mark tracking
//!
//! **Core Rule:** the mark may rise, never fall.
//!
//! Tier selection keys off the highest price since entry, so the mark must
//! survive retracements. The engine itself never adjusts the mark; callers
//! that stream prices (the `watch` command, the input form) keep it here.

/// Running maximum of observed prices
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighWaterMark {
    level: Option<f64>,
}

impl HighWaterMark {
    /// Create an empty mark
    pub fn new() -> Self {
        Self { level: None }
    }

    /// Create a mark seeded with a known high
    pub fn with_initial(level: f64) -> Self {
        Self {
            level: level.is_finite().then_some(level),
        }
    }

    /// Observe a price and return the updated mark
    ///
    /// Non-finite prices are ignored.
    ///
    /// # Example
    /// ```
    /// use tradeguard_core::watermark::HighWaterMark;
    ///
    /// let mut hwm = HighWaterMark::with_initial(105.0);
    ///
    /// // New high: $105 → $110
    /// assert_eq!(hwm.observe(110.0), Some(110.0));
    ///
    /// // Retracement: $110 → $102 (mark stays at $110)
    /// assert_eq!(hwm.observe(102.0), Some(110.0));
    /// ```
    pub fn observe(&mut self, price: f64) -> Option<f64> {
        if !price.is_finite() {
            return self.level;
        }

        let next = match self.level {
            None => price,
            Some(current) => current.max(price),
        };
        self.level = Some(next);
        self.level
    }

    /// Whether `price` would raise the mark
    pub fn would_raise(&self, price: f64) -> bool {
        price.is_finite() && self.level.map_or(true, |current| price > current)
    }

    /// Current mark (if any price has been observed)
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Force the mark to a new level, lower or higher
    pub fn reset(&mut self, level: f64) {
        self.level = level.is_finite().then_some(level);
    }

    /// Forget the mark
    pub fn clear(&mut self) {
        self.level = None;
    }
}

//! A single OHLC observation for one charting period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One open/high/low/close observation at a point in time.
///
/// Candles arrive already ordered and deduplicated from the data provider;
/// the indicator engine itself only reads the close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period start, UTC.
    pub timestamp: DateTime<Utc>,
    /// Opening price of the period.
    pub open: Decimal,
    /// Highest traded price of the period.
    pub high: Decimal,
    /// Lowest traded price of the period.
    pub low: Decimal,
    /// Closing price of the period.
    pub close: Decimal,
}

impl Candle {
    /// Creates a candle from its raw parts.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// True when the period closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

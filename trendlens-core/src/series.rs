//! Ordered price history and the derived series computed from it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candle::Candle;

/// Structural error raised when assembling a series from raw parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    /// Parallel timestamp and value vectors disagree in length.
    #[error("timestamp and value counts differ ({timestamps} vs {values})")]
    LengthMismatch {
        /// Number of timestamps supplied.
        timestamps: usize,
        /// Number of values supplied.
        values: usize,
    },
}

/// Chronologically ordered closing prices for one instrument.
///
/// Timestamps are strictly increasing and deduplicated by the data provider
/// before the series reaches this crate. Closes at the head may be absent
/// when the requested range starts before available history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    interval: Option<String>,
    timestamps: Vec<DateTime<Utc>>,
    closes: Vec<Option<Decimal>>,
}

impl PriceSeries {
    /// Builds a series from ordered candles, keeping only their closes.
    pub fn from_candles(candles: &[Candle]) -> Self {
        Self {
            interval: None,
            timestamps: candles.iter().map(|candle| candle.timestamp).collect(),
            closes: candles.iter().map(|candle| Some(candle.close)).collect(),
        }
    }

    /// Builds a series from parallel timestamp and close vectors.
    pub fn from_parts(
        timestamps: Vec<DateTime<Utc>>,
        closes: Vec<Option<Decimal>>,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != closes.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: closes.len(),
            });
        }
        Ok(Self {
            interval: None,
            timestamps,
            closes,
        })
    }

    /// Attaches a period/interval label such as `"1d"` or `"1h"`.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// The interval label, when one was attached.
    pub fn interval(&self) -> Option<&str> {
        self.interval.as_deref()
    }

    /// The timestamp index of the series.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// The close values, `None` where no observation exists.
    pub fn closes(&self) -> &[Option<Decimal>] {
        &self.closes
    }

    /// Total number of positions, absent ones included.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// True when the series holds no positions at all.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Number of positions with a defined close.
    pub fn defined_len(&self) -> usize {
        self.closes.iter().filter(|close| close.is_some()).count()
    }

    /// Stamps computed values onto this series' timestamp index.
    pub fn derive(&self, values: Vec<Option<Decimal>>) -> Result<DerivedSeries, SeriesError> {
        DerivedSeries::from_parts(self.timestamps.clone(), values)
    }
}

/// A value-or-absent series index-aligned with the prices it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<Option<Decimal>>,
}

impl DerivedSeries {
    /// Builds a derived series from parallel timestamp and value vectors.
    pub fn from_parts(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<Option<Decimal>>,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        Ok(Self { timestamps, values })
    }

    /// The timestamp index of the series.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// The computed values, `None` where the indicator is undefined.
    pub fn values(&self) -> &[Option<Decimal>] {
        &self.values
    }

    /// Total number of positions, absent ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no positions at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of positions holding a defined value.
    pub fn defined_len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// The value at `index`, `None` when absent or out of range.
    pub fn value_at(&self, index: usize) -> Option<Decimal> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined value, if any exists.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(|value| value.is_some())
    }

    /// Iterates over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<Decimal>)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

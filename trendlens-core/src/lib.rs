#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Shared domain types for price history and derived indicator series.

/// Timestamped OHLC observations.
pub mod candle;
/// Price and derived series containers.
pub mod series;

/// Re-export of the candle type for convenience.
pub use crate::candle::Candle;
/// Re-export of the series containers and their structural error.
pub use crate::series::{DerivedSeries, PriceSeries, SeriesError};

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Composable indicator math on decimal arithmetic.

/// Availability policy and named result bundles.
pub mod availability;
/// Foundational traits and shared abstractions.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// Series-level application of the indicators to price history.
pub mod overlay;

/// Re-export of the availability gate and result bundle types.
pub use crate::availability::{
    AvailabilityPolicy, IndicatorResult, IndicatorSeries, DEFAULT_MIN_POINTS,
};
/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{Indicator, IndicatorError, Input};
/// Re-export of the series-level overlay entry points and their parameters.
pub use crate::overlay::{
    ema_series, macd_overlay, macd_series, rsi_overlay, rsi_series, MacdParams, MacdSeries,
    RsiParams, HISTOGRAM, MACD_LINE, RSI_LINE, SIGNAL_LINE,
};

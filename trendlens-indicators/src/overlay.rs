//! Series-level application of the indicator primitives to price history.
//!
//! The primitives in [`crate::indicators`] are incremental; the functions
//! here drive them across a whole [`PriceSeries`], owning absence
//! propagation and timestamp alignment, and assemble the gated bundles a
//! chart consumer receives.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use trendlens_core::{DerivedSeries, PriceSeries};

use crate::availability::{AvailabilityPolicy, IndicatorResult, IndicatorSeries};
use crate::core::{Indicator, IndicatorError};
use crate::indicators::{Ema, Macd, Rsi};

/// Name of the MACD line series within a MACD bundle.
pub const MACD_LINE: &str = "macd";
/// Name of the signal line series within a MACD bundle.
pub const SIGNAL_LINE: &str = "signal";
/// Name of the histogram series within a MACD bundle.
pub const HISTOGRAM: &str = "histogram";
/// Name of the RSI series within an RSI bundle.
pub const RSI_LINE: &str = "rsi";

/// Spans for the MACD overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    /// Fast EMA span.
    pub fast: usize,
    /// Slow EMA span.
    pub slow: usize,
    /// Span of the signal EMA applied to the MACD line.
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Window for the RSI overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiParams {
    /// Number of period-over-period changes averaged per window.
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// The aligned series produced by the MACD component.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    /// MACD line (fast EMA minus slow EMA).
    pub macd: DerivedSeries,
    /// Signal line (EMA of the MACD line).
    pub signal: DerivedSeries,
    /// Histogram (MACD line minus signal line).
    pub histogram: DerivedSeries,
}

/// Applies an EMA of `span` across the series.
///
/// Absent closes yield absent outputs; the smoothing state is retained, so
/// the recursion picks up from its last value when data resumes.
pub fn ema_series(prices: &PriceSeries, span: usize) -> Result<DerivedSeries, IndicatorError> {
    let mut ema = Ema::new(span)?;
    let values = prices
        .closes()
        .iter()
        .map(|close| close.and_then(|value| ema.next(value)))
        .collect();
    Ok(prices.derive(values)?)
}

/// Applies the MACD component across the series.
///
/// With fewer than `slow` defined closes the slow EMA never stabilizes, so
/// every position of every line is left absent instead of surfacing
/// degenerate numbers; the availability gate then reports the overlay
/// unavailable.
pub fn macd_series(
    prices: &PriceSeries,
    params: &MacdParams,
) -> Result<MacdSeries, IndicatorError> {
    let mut macd = Macd::new(params.fast, params.slow, params.signal)?;

    if prices.defined_len() < params.slow {
        debug!(
            defined = prices.defined_len(),
            slow = params.slow,
            "not enough closes for the slow EMA; leaving MACD absent"
        );
        let absent: Vec<Option<Decimal>> = vec![None; prices.len()];
        return Ok(MacdSeries {
            macd: prices.derive(absent.clone())?,
            signal: prices.derive(absent.clone())?,
            histogram: prices.derive(absent)?,
        });
    }

    let mut line = Vec::with_capacity(prices.len());
    let mut signal = Vec::with_capacity(prices.len());
    let mut histogram = Vec::with_capacity(prices.len());
    for close in prices.closes() {
        let output = close.and_then(|value| macd.next(value));
        line.push(output.map(|output| output.macd));
        signal.push(output.map(|output| output.signal));
        histogram.push(output.map(|output| output.histogram));
    }

    Ok(MacdSeries {
        macd: prices.derive(line)?,
        signal: prices.derive(signal)?,
        histogram: prices.derive(histogram)?,
    })
}

/// Applies the RSI component across the series.
///
/// An absent close interrupts the change series, so the rolling window
/// restarts and must refill with `period` consecutive changes before the
/// oscillator is defined again.
pub fn rsi_series(
    prices: &PriceSeries,
    params: &RsiParams,
) -> Result<DerivedSeries, IndicatorError> {
    let mut rsi = Rsi::new(params.period)?;
    let mut values = Vec::with_capacity(prices.len());
    for close in prices.closes() {
        match close {
            Some(value) => values.push(rsi.next(*value)),
            None => {
                rsi.reset();
                values.push(None);
            }
        }
    }
    Ok(prices.derive(values)?)
}

/// Computes the MACD bundle with per-series availability verdicts.
pub fn macd_overlay(
    prices: &PriceSeries,
    params: &MacdParams,
    policy: AvailabilityPolicy,
) -> Result<IndicatorResult, IndicatorError> {
    let series = macd_series(prices, params)?;
    Ok(IndicatorResult::from_entries(vec![
        IndicatorSeries::gated(MACD_LINE, series.macd, policy),
        IndicatorSeries::gated(SIGNAL_LINE, series.signal, policy),
        IndicatorSeries::gated(HISTOGRAM, series.histogram, policy),
    ]))
}

/// Computes the RSI bundle with its availability verdict.
pub fn rsi_overlay(
    prices: &PriceSeries,
    params: &RsiParams,
    policy: AvailabilityPolicy,
) -> Result<IndicatorResult, IndicatorError> {
    let series = rsi_series(prices, params)?;
    Ok(IndicatorResult::from_entries(vec![IndicatorSeries::gated(
        RSI_LINE, series, policy,
    )]))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{ema_series, macd_series, rsi_series, MacdParams, RsiParams};
    use trendlens_core::PriceSeries;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn series(closes: &[Option<&str>]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..closes.len())
            .map(|day| start + Duration::days(day as i64))
            .collect();
        let values = closes.iter().map(|close| close.map(dec)).collect();
        PriceSeries::from_parts(timestamps, values).unwrap()
    }

    #[test]
    fn ema_of_an_empty_series_is_empty() {
        let out = ema_series(&series(&[]), 5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn ema_of_a_single_close_is_that_close() {
        let out = ema_series(&series(&[Some("17")]), 5).unwrap();
        assert_eq!(out.value_at(0), Some(dec("17")));
    }

    #[test]
    fn ema_rejects_a_zero_span() {
        assert!(ema_series(&series(&[Some("1")]), 0).is_err());
    }

    #[test]
    fn ema_skips_absent_closes_and_resumes_the_recursion() {
        // Span 3 has alpha 0.5: seed 2, gap, then 2 + 0.5*(4-2) = 3.
        let out = ema_series(&series(&[Some("2"), None, Some("4")]), 3).unwrap();
        assert_eq!(out.value_at(0), Some(dec("2")));
        assert_eq!(out.value_at(1), None);
        assert_eq!(out.value_at(2), Some(dec("3")));
    }

    #[test]
    fn ema_leaves_head_absences_absent() {
        let out = ema_series(&series(&[None, None, Some("5")]), 4).unwrap();
        assert_eq!(out.first_defined_index(), Some(2));
        assert_eq!(out.value_at(2), Some(dec("5")));
    }

    #[test]
    fn macd_blanks_everything_when_history_is_too_short() {
        let closes: Vec<Option<&str>> = vec![Some("10"); 5];
        let out = macd_series(&series(&closes), &MacdParams::default()).unwrap();
        assert_eq!(out.macd.len(), 5);
        assert_eq!(out.macd.defined_len(), 0);
        assert_eq!(out.signal.defined_len(), 0);
        assert_eq!(out.histogram.defined_len(), 0);
    }

    #[test]
    fn macd_head_absences_do_not_count_toward_the_slow_span() {
        let mut closes: Vec<Option<&str>> = vec![None; 4];
        closes.extend(vec![Some("10"); 3]);
        let params = MacdParams {
            fast: 2,
            slow: 5,
            signal: 2,
        };
        let out = macd_series(&series(&closes), &params).unwrap();
        assert_eq!(out.macd.defined_len(), 0);
    }

    #[test]
    fn macd_still_rejects_bad_spans_on_short_series() {
        let params = MacdParams {
            fast: 26,
            slow: 12,
            signal: 9,
        };
        assert!(macd_series(&series(&[Some("10")]), &params).is_err());
    }

    #[test]
    fn macd_lines_share_the_source_index() {
        let closes: Vec<Option<&str>> = vec![Some("10"); 8];
        let prices = series(&closes);
        let params = MacdParams {
            fast: 2,
            slow: 4,
            signal: 2,
        };
        let out = macd_series(&prices, &params).unwrap();
        assert_eq!(out.macd.timestamps(), prices.timestamps());
        assert_eq!(out.signal.timestamps(), prices.timestamps());
        assert_eq!(out.macd.len(), prices.len());
    }

    #[test]
    fn rsi_restarts_its_window_after_a_gap() {
        // Period 2: the first two closes after the gap only rebuild the
        // window, so the gap pushes the first defined value out to index 6.
        let out = rsi_series(
            &series(&[
                Some("1"),
                Some("2"),
                Some("3"),
                None,
                Some("4"),
                Some("5"),
                Some("6"),
            ]),
            &RsiParams { period: 2 },
        )
        .unwrap();
        assert_eq!(out.value_at(2), Some(dec("100")));
        assert_eq!(out.value_at(3), None);
        assert_eq!(out.value_at(4), None);
        assert_eq!(out.value_at(5), None);
        assert_eq!(out.value_at(6), Some(dec("100")));
    }

    #[test]
    fn rsi_is_absent_for_the_first_period_positions() {
        let closes: Vec<Option<&str>> = vec![
            Some("1"),
            Some("3"),
            Some("2"),
            Some("5"),
            Some("4"),
            Some("6"),
        ];
        let out = rsi_series(&series(&closes), &RsiParams { period: 3 }).unwrap();
        assert_eq!(out.first_defined_index(), Some(3));
    }
}

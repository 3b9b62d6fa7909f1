//! Moving Average Convergence Divergence (MACD).

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// MACD output (line, signal line, and histogram).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    /// MACD line value (fast EMA minus slow EMA).
    pub macd: Decimal,
    /// Signal line value (EMA of the MACD line).
    pub signal: Decimal,
    /// Distance between the MACD and signal lines.
    pub histogram: Decimal,
}

/// Difference of a fast and a slow EMA, with a signal EMA trailing it.
///
/// The fast span must sit strictly below the slow span; equal or inverted
/// spans would make the line collapse to zero or flip its sign.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Creates a MACD with custom fast/slow/signal spans.
    pub fn new(
        fast_span: usize,
        slow_span: usize,
        signal_span: usize,
    ) -> Result<Self, IndicatorError> {
        if fast_span == 0 {
            return Err(IndicatorError::invalid_period("MACD", fast_span));
        }
        if slow_span == 0 {
            return Err(IndicatorError::invalid_period("MACD", slow_span));
        }
        if signal_span == 0 {
            return Err(IndicatorError::invalid_period("MACD", signal_span));
        }
        if fast_span >= slow_span {
            return Err(IndicatorError::misordered_spans("MACD", fast_span, slow_span));
        }

        Ok(Self {
            fast: Ema::new(fast_span)?,
            slow: Ema::new(slow_span)?,
            signal: Ema::new(signal_span)?,
        })
    }
}

impl Indicator for Macd {
    type Input = Decimal;
    type Output = MacdOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let fast = self.fast.next(input)?;
        let slow = self.slow.next(input)?;
        let macd = fast - slow;
        let signal = self.signal.next(macd)?;

        Some(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }
}

//! Foundational trait, input abstraction, and error type shared by all
//! indicators.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use trendlens_core::{Candle, SeriesError};

/// Errors raised when an indicator is configured with invalid parameters.
///
/// Parameters are validated at construction, before any computation runs;
/// a short price history is never an error and is reported through the
/// availability gate instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// A span or period below the minimum of one.
    #[error("{indicator}: period must be at least 1, got {period}")]
    InvalidPeriod {
        /// Indicator that rejected the parameter.
        indicator: &'static str,
        /// The offending period.
        period: usize,
    },
    /// A fast span that does not sit strictly below its slow counterpart.
    #[error("{indicator}: fast span {fast} must be shorter than slow span {slow}")]
    MisorderedSpans {
        /// Indicator that rejected the parameters.
        indicator: &'static str,
        /// The fast span supplied.
        fast: usize,
        /// The slow span supplied.
        slow: usize,
    },
    /// A structural series error from the domain layer.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl IndicatorError {
    /// Shorthand for the [`IndicatorError::InvalidPeriod`] variant.
    pub fn invalid_period(indicator: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { indicator, period }
    }

    /// Shorthand for the [`IndicatorError::MisorderedSpans`] variant.
    pub fn misordered_spans(indicator: &'static str, fast: usize, slow: usize) -> Self {
        Self::MisorderedSpans {
            indicator,
            fast,
            slow,
        }
    }
}

/// An observation an indicator can consume.
pub trait Input {
    /// The numeric value fed into the computation.
    fn value(&self) -> Decimal;
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

impl Input for Candle {
    fn value(&self) -> Decimal {
        self.close
    }
}

/// An incremental computation fed one observation at a time.
///
/// `next` returns `None` while the indicator is still warming up or when
/// the value is undefined at the current position.
pub trait Indicator {
    /// Observation type consumed by the indicator.
    type Input;
    /// Value type produced once defined.
    type Output;

    /// Feeds one observation and returns the output when defined.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Clears accumulated state back to construction time.
    fn reset(&mut self);
}

pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from_usize(value).expect("usize fits within Decimal's range")
}

//! Exponential Moving Average (EMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, Indicator, IndicatorError, Input};

/// Recursively smoothed average seeded from its first observation.
///
/// Uses the no-adjustment recursion `next = prev + alpha * (value - prev)`
/// with `alpha = 2 / (span + 1)`. The first observation passes through
/// unchanged as the seed, so a span of one reproduces its input exactly.
#[derive(Debug, Clone)]
pub struct Ema<I = Decimal> {
    span: usize,
    alpha: Decimal,
    state: Option<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Ema<I>
where
    I: Input,
{
    /// Creates a new EMA with the provided span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        if span == 0 {
            return Err(IndicatorError::invalid_period("EMA", span));
        }

        Ok(Self {
            span,
            alpha: Decimal::TWO / decimal_from_usize(span + 1),
            state: None,
            marker: PhantomData,
        })
    }

    /// Returns the configured span.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Returns the current EMA value, if any observation has been fed.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }
}

impl<I> Indicator for Ema<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let next = match self.state {
            None => value,
            Some(prev) => prev + (value - prev) * self.alpha,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

//! Relative Strength Index (RSI).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};
use crate::indicators::sma::Sma;

/// Momentum oscillator scaled between 0 and 100.
///
/// Splits period-over-period changes into gains and losses, averages each
/// over a trailing window of `period` consecutive changes, and maps the
/// gain/loss ratio onto the 0–100 scale. A window with zero gain and zero
/// loss (a flat price) defines no value at all; a window with only gains
/// saturates at 100, only losses at 0.
#[derive(Debug, Clone)]
pub struct Rsi<I = Decimal> {
    period: usize,
    prev_close: Option<Decimal>,
    gains: Sma<Decimal>,
    losses: Sma<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Rsi<I>
where
    I: Input,
{
    /// Creates a new RSI with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("RSI", period));
        }

        Ok(Self {
            period,
            prev_close: None,
            gains: Sma::new(period)?,
            losses: Sma::new(period)?,
            marker: PhantomData,
        })
    }

    /// Returns the configured period.
    pub fn period(&self) -> usize {
        self.period
    }

    fn oscillator(avg_gain: Decimal, avg_loss: Decimal) -> Option<Decimal> {
        if avg_gain.is_zero() && avg_loss.is_zero() {
            None
        } else if avg_loss.is_zero() {
            Some(Decimal::ONE_HUNDRED)
        } else if avg_gain.is_zero() {
            Some(Decimal::ZERO)
        } else {
            let rs = avg_gain / avg_loss;
            Some(Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (rs + Decimal::ONE))
        }
    }
}

impl<I> Indicator for Rsi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let prev = match self.prev_close.replace(value) {
            Some(prev) => prev,
            None => return None,
        };

        let change = value - prev;
        let gain = if change > Decimal::ZERO {
            change
        } else {
            Decimal::ZERO
        };
        let loss = if change < Decimal::ZERO {
            -change
        } else {
            Decimal::ZERO
        };

        match (self.gains.next(gain), self.losses.next(loss)) {
            (Some(avg_gain), Some(avg_loss)) => Self::oscillator(avg_gain, avg_loss),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.gains.reset();
        self.losses.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::Rsi;
    use crate::Indicator;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn assert_close(lhs: Decimal, rhs: Decimal) {
        let tolerance = dec("0.0000000001");
        assert!((lhs - rhs).abs() <= tolerance, "{lhs} != {rhs}");
    }

    #[test]
    fn needs_a_full_window_of_changes() {
        // Period 3 consumes one observation for the first change and three
        // changes for the window, so the fourth observation emits first.
        let mut rsi = Rsi::new(3).unwrap();
        assert_eq!(rsi.next(dec("1")), None);
        assert_eq!(rsi.next(dec("2")), None);
        assert_eq!(rsi.next(dec("3")), None);
        assert!(rsi.next(dec("2")).is_some());
    }

    #[test]
    fn computes_expected_values() {
        let mut rsi = Rsi::new(3).unwrap();
        let series = ["1", "2", "3", "2", "1", "2", "3", "4"];
        let outputs: Vec<_> = series
            .into_iter()
            .filter_map(|value| rsi.next(dec(value)))
            .collect();

        let expected = [
            dec("66.666666666666666666666666667"),
            dec("33.333333333333333333333333333"),
            dec("33.333333333333333333333333333"),
            dec("66.666666666666666666666666667"),
            dec("100"),
        ];

        assert_eq!(outputs.len(), expected.len());
        for (lhs, rhs) in outputs.iter().zip(expected.iter()) {
            assert_close(*lhs, *rhs);
        }
    }

    #[test]
    fn only_gains_saturate_at_one_hundred() {
        let mut rsi = Rsi::new(3).unwrap();
        let mut last = None;
        for value in 1..=6 {
            last = rsi.next(Decimal::from(value));
        }
        assert_eq!(last, Some(dec("100")));
    }

    #[test]
    fn only_losses_saturate_at_zero() {
        let mut rsi = Rsi::new(3).unwrap();
        let mut last = None;
        for value in (1..=6).rev() {
            last = rsi.next(Decimal::from(value));
        }
        assert_eq!(last, Some(dec("0")));
    }

    #[test]
    fn flat_prices_define_no_value() {
        let mut rsi = Rsi::new(3).unwrap();
        for _ in 0..8 {
            assert_eq!(rsi.next(dec("7")), None);
        }
    }

    #[test]
    fn reset_discards_the_window() {
        let mut rsi = Rsi::new(2).unwrap();
        rsi.next(dec("1"));
        rsi.next(dec("2"));
        assert!(rsi.next(dec("3")).is_some());
        rsi.reset();
        assert_eq!(rsi.next(dec("3")), None);
    }
}

//! Simple Moving Average (SMA) with a minimum period of one.

use std::collections::VecDeque;

use baltica_core::ConfigError;

use crate::core::Indicator;

/// Computes the arithmetic mean over a rolling window.
///
/// Unlike a strict rolling mean, the first `period - 1` positions average
/// over however many values have arrived so the early window is populated
/// instead of left blank.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    sum: f64,
    window: VecDeque<f64>,
}

impl Sma {
    /// Creates a new SMA with the provided period.
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::invalid_period("SMA", period, 1));
        }

        Ok(Self {
            period,
            sum: 0.0,
            window: VecDeque::with_capacity(period),
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<Self::Output> {
        self.window.push_back(value);
        self.sum += value;

        if self.window.len() > self.period {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }

        Some(self.sum / self.window.len() as f64)
    }

    fn reset(&mut self) {
        self.sum = 0.0;
        self.window.clear();
    }
}

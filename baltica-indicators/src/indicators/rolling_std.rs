//! Rolling sample standard deviation.

use std::collections::VecDeque;

use baltica_core::ConfigError;

use crate::core::Indicator;

/// Sample (n - 1) standard deviation over a full rolling window.
///
/// Unlike [`crate::Sma`], there is no minimum-period relaxation: positions
/// before the window fills produce `None`.
#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
    sum: f64,
    sum_of_squares: f64,
    window: VecDeque<f64>,
}

impl RollingStd {
    /// Creates a new rolling std with the provided period.
    pub fn new(period: usize) -> Result<Self, ConfigError> {
        if period < 2 {
            return Err(ConfigError::invalid_period("RollingStd", period, 2));
        }

        Ok(Self {
            period,
            sum: 0.0,
            sum_of_squares: 0.0,
            window: VecDeque::with_capacity(period),
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    fn sample_std(&self) -> f64 {
        let n = self.period as f64;
        let mean = self.sum / n;
        let variance = ((self.sum_of_squares - self.sum * mean) / (n - 1.0)).max(0.0);
        variance.sqrt()
    }
}

impl Indicator for RollingStd {
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<Self::Output> {
        self.window.push_back(value);
        self.sum += value;
        self.sum_of_squares += value * value;

        if self.window.len() > self.period {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
                self.sum_of_squares -= oldest * oldest;
            }
        }

        if self.window.len() == self.period {
            Some(self.sample_std())
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.sum = 0.0;
        self.sum_of_squares = 0.0;
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::RollingStd;
    use crate::Indicator;

    fn assert_close(lhs: f64, rhs: f64) {
        assert!((lhs - rhs).abs() <= 1e-9, "{lhs} != {rhs}");
    }

    #[test]
    fn absent_until_the_window_fills() {
        let mut std = RollingStd::new(3).unwrap();
        assert_eq!(std.next(1.0), None);
        assert_eq!(std.next(2.0), None);
        assert!(std.next(3.0).is_some());
    }

    #[test]
    fn matches_the_sample_formula() {
        let mut std = RollingStd::new(3).unwrap();
        std.next(2.0);
        std.next(4.0);
        // mean 4, squared deviations 4 + 0 + 4, ddof 1 -> sqrt(4) = 2
        assert_close(std.next(6.0).unwrap(), 2.0);
    }

    #[test]
    fn trailing_window_drops_old_values() {
        let mut std = RollingStd::new(2).unwrap();
        std.next(0.0);
        std.next(10.0);
        // window is now [10, 10]
        assert_close(std.next(10.0).unwrap(), 0.0);
    }

    #[test]
    fn constant_window_has_zero_dispersion() {
        let mut std = RollingStd::new(4).unwrap();
        let mut last = None;
        for _ in 0..4 {
            last = std.next(7.5);
        }
        assert_close(last.unwrap(), 0.0);
    }

    #[test]
    fn degenerate_periods_are_rejected() {
        assert!(RollingStd::new(0).is_err());
        assert!(RollingStd::new(1).is_err());
    }
}

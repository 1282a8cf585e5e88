//! Exponential Weighted Moving Average (EWMA).

use baltica_core::ConfigError;

use crate::core::Indicator;

/// Span-parameterised exponential mean with `alpha = 2 / (span + 1)`.
///
/// Seeded from the first value, so there is no warm-up suppression: every
/// position produces an output.
#[derive(Debug, Clone)]
pub struct Ewma {
    span: usize,
    alpha: f64,
    state: Option<f64>,
}

impl Ewma {
    /// Creates a new EWMA with the provided span.
    pub fn new(span: usize) -> Result<Self, ConfigError> {
        if span == 0 {
            return Err(ConfigError::invalid_period("EWMA", span, 1));
        }

        Ok(Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
            state: None,
        })
    }

    /// Returns the configured span.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Returns the current value, if any input has been consumed.
    pub fn value(&self) -> Option<f64> {
        self.state
    }
}

impl Indicator for Ewma {
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<Self::Output> {
        let next = match self.state {
            None => value,
            Some(current) => self.alpha * value + (1.0 - self.alpha) * current,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Ewma;
    use crate::Indicator;

    fn assert_close(lhs: f64, rhs: f64) {
        assert!((lhs - rhs).abs() <= 1e-9, "{lhs} != {rhs}");
    }

    #[test]
    fn first_output_is_the_first_value() {
        let mut ewma = Ewma::new(30).unwrap();
        assert_eq!(ewma.next(12.5), Some(12.5));
    }

    #[test]
    fn follows_the_recurrence() {
        // span 3 -> alpha 0.5
        let mut ewma = Ewma::new(3).unwrap();
        ewma.next(2.0);
        assert_close(ewma.next(4.0).unwrap(), 3.0);
        assert_close(ewma.next(8.0).unwrap(), 5.5);
    }

    #[test]
    fn recurrence_matches_direct_expansion() {
        let span = 9;
        let alpha = 2.0 / (span as f64 + 1.0);
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];

        let mut ewma = Ewma::new(span).unwrap();
        let mut expected = values[0];
        assert_close(ewma.next(values[0]).unwrap(), expected);
        for &value in &values[1..] {
            expected = alpha * value + (1.0 - alpha) * expected;
            assert_close(ewma.next(value).unwrap(), expected);
        }
    }

    #[test]
    fn reset_forgets_the_seed() {
        let mut ewma = Ewma::new(3).unwrap();
        ewma.next(100.0);
        ewma.reset();
        assert_eq!(ewma.next(1.0), Some(1.0));
    }
}

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used across the analytics crates.
pub type AnalyticsResult<T> = Result<T, ConfigError>;

/// Invalid caller input. Surfaced before anything is computed; absence of
/// data is never an error and is represented by empty results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Raised when an indicator is constructed with an unusable period.
    #[error("{indicator} period must be at least {minimum}, got {period}")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
        minimum: usize,
    },
    /// Raised when the display window ends before it starts.
    #[error("display window is inverted: {start} is after {end}")]
    WindowInverted { start: NaiveDate, end: NaiveDate },
    /// Raised when a threshold list contains NaN or an infinity.
    #[error("threshold is not a finite number: {value}")]
    NonFiniteThreshold { value: f64 },
    /// Raised when a calendar bucket is requested without averaging.
    #[error("calendar bucket requested while forecast averaging is disabled")]
    BucketWithoutAveraging,
}

impl ConfigError {
    /// Convenience constructor mirroring the indicator constructors.
    pub fn invalid_period(indicator: &'static str, period: usize, minimum: usize) -> Self {
        Self::InvalidPeriod {
            indicator,
            period,
            minimum,
        }
    }
}

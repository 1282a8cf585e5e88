use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsResult, ConfigError};

/// Inclusive `[start, end]` date range the caller wants rendered. The range
/// crops results; it never shifts indicator lookback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DisplayWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Rejects an inverted range. Components call this before computing
    /// anything so a bad window never yields a partial result.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.end < self.start {
            return Err(ConfigError::WindowInverted {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

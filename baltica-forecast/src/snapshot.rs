use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use baltica_core::{month_key, quarter_start, MonthKey, Observation, ObservationSet};

/// A forecast category the caller selected, with its calendar capability.
///
/// `folds_to_quarters` marks a category whose horizon is month-granular and
/// may be folded into quarter buckets. This replaces a verbatim check of one
/// contract name, so new month-granular categories opt in via configuration
/// instead of code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastCategory {
    /// Category label as it appears in the observation table.
    pub name: String,
    /// Whether month-granular points may be folded into quarter buckets.
    pub folds_to_quarters: bool,
}

impl ForecastCategory {
    /// A category grouped by plain calendar months.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folds_to_quarters: false,
        }
    }

    /// A month-granular category that may fold into quarters.
    pub fn foldable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folds_to_quarters: true,
        }
    }
}

/// All selected-category observations recorded on one archive date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    /// The archive date this snapshot was recorded on.
    pub archive_date: NaiveDate,
    rows: Vec<Observation>,
}

impl ForecastSnapshot {
    /// Extracts the snapshot for `archive_date`, keeping only rows of the
    /// selected categories. Rows are copied; the caller's table is left
    /// untouched.
    pub fn extract(
        set: &ObservationSet,
        archive_date: NaiveDate,
        categories: &[ForecastCategory],
    ) -> Self {
        let rows = set
            .recorded_on(archive_date)
            .into_iter()
            .filter(|row| categories.iter().any(|cat| cat.name == row.category))
            .cloned()
            .collect();
        Self { archive_date, rows }
    }

    /// True when no selected category has rows on this date.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// This snapshot's curve for one category, ordered by start date.
    pub fn curve_rows(&self, category: &str) -> Vec<&Observation> {
        let mut rows: Vec<&Observation> = self
            .rows
            .iter()
            .filter(|row| row.category == category)
            .collect();
        rows.sort_by_key(|row| row.start_date);
        rows
    }

    /// Distinct `(year, month)` values spanned by this snapshot's points
    /// for one category.
    pub fn month_set(&self, category: &str) -> BTreeSet<MonthKey> {
        self.curve_rows(category)
            .iter()
            .map(|row| month_key(row.start_date))
            .collect()
    }

    /// Quarter key for grouping: the earliest quarter start touched by this
    /// snapshot's points. A snapshot straddling a quarter boundary keeps
    /// only this first quarter as its key.
    pub fn quarter_key(&self, category: &str) -> Option<NaiveDate> {
        self.curve_rows(category)
            .iter()
            .map(|row| quarter_start(row.start_date))
            .min()
    }
}

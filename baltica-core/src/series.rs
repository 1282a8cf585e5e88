use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::observation::Observation;
use crate::window::DisplayWindow;

/// The caller's observation table. Views hand out sorted working copies so
/// the same table can back several analyses at once without aliasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    rows: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct category labels, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let unique: BTreeSet<&str> = self.rows.iter().map(|row| row.category.as_str()).collect();
        unique.into_iter().collect()
    }

    /// Full history of one category ordered by archive date. An unknown
    /// category yields an empty series.
    pub fn series(&self, category: &str) -> Series {
        let mut rows: Vec<Observation> = self
            .rows
            .iter()
            .filter(|row| row.category == category)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.archive_date);
        Series {
            category: category.to_string(),
            rows,
        }
    }

    /// Rows recorded on one archive date, any category.
    pub fn recorded_on(&self, archive_date: NaiveDate) -> Vec<&Observation> {
        self.rows
            .iter()
            .filter(|row| row.archive_date == archive_date)
            .collect()
    }
}

/// Ordered-by-archive-date observations of a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    category: String,
    rows: Vec<Observation>,
}

impl Series {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(archive_date, route_average)` pairs in series order.
    pub fn values(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.rows.iter().map(|row| (row.archive_date, row.route_average))
    }

    /// Rows falling inside the display window.
    pub fn within(&self, window: &DisplayWindow) -> Series {
        Series {
            category: self.category.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| window.contains(row.archive_date))
                .cloned()
                .collect(),
        }
    }

    /// Rows recorded strictly before `date`. Used by callers that show
    /// history only up to the forecast date.
    pub fn up_to(&self, date: NaiveDate) -> Series {
        Series {
            category: self.category.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.archive_date < date)
                .cloned()
                .collect(),
        }
    }
}

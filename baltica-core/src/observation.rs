use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the ingested table. Immutable once constructed; analytics
/// components copy what they need instead of annotating rows in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Index name or contract-type label, e.g. `"C5TC FACT"`.
    pub category: String,
    /// Date the observation (or forecast run) was recorded.
    pub archive_date: NaiveDate,
    /// For forecast rows, the date the forecasted period begins. Fact rows
    /// carry their archive date here.
    pub start_date: NaiveDate,
    /// Observed or forecast route average.
    pub route_average: f64,
    /// Compound label; the token after the first separator identifies the
    /// sub-instrument (e.g. `"C5TC_+2MON"` -> `"+2MON"`).
    pub index_label: String,
}

impl Observation {
    /// Display key for the sub-instrument this row describes.
    pub fn instrument(&self) -> Option<&str> {
        self.index_label.split('_').nth(1)
    }
}

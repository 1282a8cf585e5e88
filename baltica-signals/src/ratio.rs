use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use baltica_core::{AnalyticsResult, DisplayWindow, Series};

/// One paired observation: the ratio at a date plus the preceding ratio.
/// `ratio_prev` is `None` on the first joined point, which therefore never
/// participates in crossing detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    /// Date both categories were observed.
    pub archive_date: NaiveDate,
    /// Numerator value divided by denominator value.
    pub ratio: f64,
    /// Ratio of the immediately preceding joined point.
    pub ratio_prev: Option<f64>,
}

/// Builds the ratio sequence over the display window.
///
/// Only dates present in both categories participate (inner join). If either
/// windowed series is empty the result is empty; absence of overlap is not
/// an error.
pub fn ratio_series(
    numerator: &Series,
    denominator: &Series,
    window: DisplayWindow,
) -> AnalyticsResult<Vec<RatioPoint>> {
    window.validate()?;

    let numerator = numerator.within(&window);
    let denominator = denominator.within(&window);
    if numerator.is_empty() || denominator.is_empty() {
        return Ok(Vec::new());
    }

    let denominator_by_date: BTreeMap<NaiveDate, f64> = denominator.values().collect();

    let mut points = Vec::new();
    let mut previous = None;
    for (archive_date, value) in numerator.values() {
        if let Some(other) = denominator_by_date.get(&archive_date) {
            let ratio = value / other;
            points.push(RatioPoint {
                archive_date,
                ratio,
                ratio_prev: previous,
            });
            previous = Some(ratio);
        }
    }

    Ok(points)
}

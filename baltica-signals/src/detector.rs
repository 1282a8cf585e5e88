use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use baltica_core::{month_key, AnalyticsResult, ConfigError, DisplayWindow, MonthKey, Series};

use crate::ratio::{ratio_series, RatioPoint};

/// Direction of a threshold crossing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SignalKind {
    /// The ratio dropped below a threshold.
    Low,
    /// The ratio rose above a threshold.
    High,
}

/// A discrete crossing event, surviving monthly deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSignal {
    /// Date of the crossing.
    pub archive_date: NaiveDate,
    /// Direction of the crossing.
    pub kind: SignalKind,
    /// The threshold that was crossed.
    pub threshold: f64,
    /// Ratio value at the crossing.
    pub ratio: f64,
}

/// Combined detector output: the full windowed ratio sequence plus the
/// deduplicated signal list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioAnalysis {
    /// Joined ratio points in archive-date order.
    pub points: Vec<RatioPoint>,
    /// At most one signal per calendar month and direction, sorted by date.
    pub signals: Vec<ThresholdSignal>,
}

/// Detects threshold crossings on the ratio of two categories.
///
/// A Low crossing fires when the ratio comes from at-or-above a threshold
/// and lands strictly below it; a High crossing comes from at-or-below and
/// lands strictly above. The boundary inclusivity differs between the two
/// directions; downstream consumers depend on these exact rules, so do not
/// change them without revisiting the signal semantics.
///
/// All crossings across all thresholds are pooled, then reduced to the
/// earliest one per `(calendar month, direction)`. A noisy ratio oscillating
/// around a threshold therefore emits a monthly cadence instead of one
/// event per tick.
pub fn detect(
    numerator: &Series,
    denominator: &Series,
    window: DisplayWindow,
    low_thresholds: &[f64],
    high_thresholds: &[f64],
) -> AnalyticsResult<RatioAnalysis> {
    for &threshold in low_thresholds.iter().chain(high_thresholds) {
        if !threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold { value: threshold });
        }
    }

    let points = ratio_series(numerator, denominator, window)?;

    let mut earliest: BTreeMap<(MonthKey, SignalKind), ThresholdSignal> = BTreeMap::new();
    for point in &points {
        let Some(previous) = point.ratio_prev else {
            continue;
        };
        for &threshold in low_thresholds {
            if previous >= threshold && point.ratio < threshold {
                record(&mut earliest, point, SignalKind::Low, threshold);
            }
        }
        for &threshold in high_thresholds {
            if previous <= threshold && point.ratio > threshold {
                record(&mut earliest, point, SignalKind::High, threshold);
            }
        }
    }

    let mut signals: Vec<ThresholdSignal> = earliest.into_values().collect();
    signals.sort_by(|a, b| {
        a.archive_date
            .cmp(&b.archive_date)
            .then(a.kind.cmp(&b.kind))
    });

    debug!(
        numerator = numerator.category(),
        denominator = denominator.category(),
        points = points.len(),
        signals = signals.len(),
        "ratio analysis complete"
    );

    Ok(RatioAnalysis { points, signals })
}

// Points arrive chronologically, so the first insert per key is the
// earliest crossing of that month and direction.
fn record(
    earliest: &mut BTreeMap<(MonthKey, SignalKind), ThresholdSignal>,
    point: &RatioPoint,
    kind: SignalKind,
    threshold: f64,
) {
    earliest
        .entry((month_key(point.archive_date), kind))
        .or_insert(ThresholdSignal {
            archive_date: point.archive_date,
            kind,
            threshold,
            ratio: point.ratio,
        });
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::ForecastCurve;

/// A curve set pivoted for tabular display: one row per archive date, one
/// column per sub-instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveTable {
    /// Category the table describes.
    pub category: String,
    /// Instrument labels in first-seen start-date order.
    pub columns: Vec<String>,
    /// One row per snapshot, in archive-date order.
    pub rows: Vec<CurveTableRow>,
}

/// One pivoted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveTableRow {
    /// Archive date of the snapshot this row came from.
    pub archive_date: NaiveDate,
    /// Values aligned with [`CurveTable::columns`]; `None` where the
    /// snapshot had no point for that instrument.
    pub cells: Vec<Option<f64>>,
}

/// Pivots raw per-snapshot curves into per-category tables.
///
/// Column order follows the instruments' start dates as they first appear,
/// so near-dated contracts come first. Averaged curves carry no archive date
/// or instrument labels and are ignored.
pub fn pivot(curves: &[ForecastCurve]) -> Vec<CurveTable> {
    let mut by_category: BTreeMap<&str, Vec<&ForecastCurve>> = BTreeMap::new();
    for curve in curves {
        if curve.archive_date.is_some() {
            by_category.entry(&curve.category).or_default().push(curve);
        }
    }

    by_category
        .into_iter()
        .map(|(category, curves)| build_table(category, &curves))
        .collect()
}

fn build_table(category: &str, curves: &[&ForecastCurve]) -> CurveTable {
    // Instruments ordered by the start date they were first seen at.
    let mut labeled: Vec<(NaiveDate, &str)> = curves
        .iter()
        .flat_map(|curve| curve.points.iter())
        .filter_map(|point| {
            point
                .instrument
                .as_deref()
                .map(|instrument| (point.start_date, instrument))
        })
        .collect();
    labeled.sort_by_key(|&(start_date, _)| start_date);

    let mut columns: Vec<String> = Vec::new();
    for (_, instrument) in labeled {
        if !columns.iter().any(|existing| existing.as_str() == instrument) {
            columns.push(instrument.to_string());
        }
    }

    let mut rows: Vec<CurveTableRow> = curves
        .iter()
        .filter_map(|curve| {
            let archive_date = curve.archive_date?;
            let mut cells = vec![None; columns.len()];
            for point in &curve.points {
                if let Some(instrument) = point.instrument.as_deref() {
                    if let Some(index) = columns.iter().position(|col| col.as_str() == instrument) {
                        cells[index] = Some(point.route_average);
                    }
                }
            }
            Some(CurveTableRow {
                archive_date,
                cells,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.archive_date);

    CurveTable {
        category: category.to_string(),
        columns,
        rows,
    }
}

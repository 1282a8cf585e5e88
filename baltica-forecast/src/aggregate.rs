use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use baltica_core::{
    quarter_number, AnalyticsResult, ConfigError, MonthKey, Observation, ObservationSet,
};

use crate::snapshot::{ForecastCategory, ForecastSnapshot};

/// Calendar bucket used to group snapshots before averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarBucket {
    /// Group snapshots sharing an identical month-set.
    Month,
    /// Fold month-granular points into quarters; categories without the
    /// capability fall back to [`CalendarBucket::Month`] behavior.
    MonthFoldedToQuarter,
}

/// Caller-chosen aggregation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastOptions {
    /// Average matching points across snapshots instead of passing each
    /// snapshot's curve through.
    pub average: bool,
    /// Optional calendar grouping, only meaningful while averaging.
    pub bucket: Option<CalendarBucket>,
}

impl ForecastOptions {
    /// Raw pass-through of each snapshot's curves.
    pub fn raw() -> Self {
        Self::default()
    }

    /// Pooled averaging without calendar grouping.
    pub fn averaged() -> Self {
        Self {
            average: true,
            bucket: None,
        }
    }

    /// Averaging with a calendar bucket.
    pub fn bucketed(bucket: CalendarBucket) -> Self {
        Self {
            average: true,
            bucket: Some(bucket),
        }
    }

    /// A bucket without averaging is a caller mistake, not a silent no-op.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.bucket.is_some() && !self.average {
            return Err(ConfigError::BucketWithoutAveraging);
        }
        Ok(())
    }
}

/// One `(start_date, value)` pair of a curve. Raw curves keep the row's
/// sub-instrument label; averaged points have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Date the forecasted period begins.
    pub start_date: NaiveDate,
    /// Raw or averaged route average.
    pub route_average: f64,
    /// Sub-instrument display key, present on raw curves only.
    pub instrument: Option<String>,
}

/// A labeled curve, raw or aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCurve {
    /// Category the curve belongs to.
    pub category: String,
    /// Display label (archive date, averaging marker, or calendar bucket).
    pub label: String,
    /// The snapshot's archive date for raw curves; `None` once averaged.
    pub archive_date: Option<NaiveDate>,
    /// Points ordered by start date.
    pub points: Vec<CurvePoint>,
}

/// Aggregates the selected snapshots into display-ready curves.
///
/// Categories with no points anywhere are skipped silently; the result is
/// empty rather than an error when nothing matches.
pub fn aggregate(
    set: &ObservationSet,
    categories: &[ForecastCategory],
    archive_dates: &[NaiveDate],
    options: &ForecastOptions,
) -> AnalyticsResult<Vec<ForecastCurve>> {
    options.validate()?;

    let snapshots: Vec<ForecastSnapshot> = archive_dates
        .iter()
        .map(|&archive_date| ForecastSnapshot::extract(set, archive_date, categories))
        .collect();

    let mut curves = Vec::new();
    for category in categories {
        if !options.average {
            curves.extend(raw_curves(&snapshots, &category.name));
            continue;
        }
        match options.bucket {
            None => curves.extend(pooled_average(&snapshots, &category.name)),
            Some(CalendarBucket::Month) => {
                curves.extend(month_grouped(&snapshots, &category.name));
            }
            Some(CalendarBucket::MonthFoldedToQuarter) => {
                if category.folds_to_quarters {
                    curves.extend(quarter_grouped(&snapshots, &category.name));
                } else {
                    curves.extend(month_grouped(&snapshots, &category.name));
                }
            }
        }
    }

    debug!(
        snapshots = snapshots.len(),
        categories = categories.len(),
        curves = curves.len(),
        "forecast aggregation complete"
    );

    Ok(curves)
}

fn raw_curves(snapshots: &[ForecastSnapshot], category: &str) -> Vec<ForecastCurve> {
    snapshots
        .iter()
        .filter_map(|snapshot| {
            let rows = snapshot.curve_rows(category);
            if rows.is_empty() {
                return None;
            }
            let points = rows
                .iter()
                .map(|row| CurvePoint {
                    start_date: row.start_date,
                    route_average: row.route_average,
                    instrument: row.instrument().map(str::to_string),
                })
                .collect();
            Some(ForecastCurve {
                category: category.to_string(),
                label: format!("{category} ({})", snapshot.archive_date),
                archive_date: Some(snapshot.archive_date),
                points,
            })
        })
        .collect()
}

fn pooled_average(snapshots: &[ForecastSnapshot], category: &str) -> Option<ForecastCurve> {
    let rows: Vec<&Observation> = snapshots
        .iter()
        .flat_map(|snapshot| snapshot.curve_rows(category))
        .collect();
    if rows.is_empty() {
        return None;
    }
    Some(ForecastCurve {
        category: category.to_string(),
        label: format!("{category} (Average)"),
        archive_date: None,
        points: mean_by_start_date(&rows),
    })
}

/// Snapshots sharing an identical month-set are merged; singleton groups
/// emit nothing, so only genuine multi-snapshot averages are produced.
fn month_grouped(snapshots: &[ForecastSnapshot], category: &str) -> Vec<ForecastCurve> {
    let mut groups: BTreeMap<Vec<MonthKey>, Vec<&ForecastSnapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        let months: Vec<MonthKey> = snapshot.month_set(category).into_iter().collect();
        if months.is_empty() {
            continue;
        }
        groups.entry(months).or_default().push(snapshot);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(months, members)| {
            let rows: Vec<&Observation> = members
                .iter()
                .flat_map(|snapshot| snapshot.curve_rows(category))
                .collect();
            let (year, month) = months[0];
            ForecastCurve {
                category: category.to_string(),
                label: format!("{category} - {year}-{month:02}"),
                archive_date: None,
                points: mean_by_start_date(&rows),
            }
        })
        .collect()
}

/// Snapshots are keyed by the earliest quarter their points touch, then
/// pooled and averaged per absolute start date. A snapshot straddling a
/// quarter boundary contributes all of its points to its key's group and
/// none to the later quarter's.
fn quarter_grouped(snapshots: &[ForecastSnapshot], category: &str) -> Vec<ForecastCurve> {
    let mut groups: BTreeMap<NaiveDate, Vec<&ForecastSnapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        if let Some(key) = snapshot.quarter_key(category) {
            groups.entry(key).or_default().push(snapshot);
        }
    }

    groups
        .into_iter()
        .map(|(quarter, members)| {
            let rows: Vec<&Observation> = members
                .iter()
                .flat_map(|snapshot| snapshot.curve_rows(category))
                .collect();
            ForecastCurve {
                category: category.to_string(),
                label: format!(
                    "{category} - {}-Q{}",
                    quarter.year(),
                    quarter_number(quarter)
                ),
                archive_date: None,
                points: mean_by_start_date(&rows),
            }
        })
        .collect()
}

fn mean_by_start_date(rows: &[&Observation]) -> Vec<CurvePoint> {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.start_date).or_insert((0.0, 0));
        entry.0 += row.route_average;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(start_date, (sum, count))| CurvePoint {
            start_date,
            route_average: sum / count as f64,
            instrument: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{aggregate, CalendarBucket, ForecastOptions};
    use crate::snapshot::ForecastCategory;
    use baltica_core::{ConfigError, Observation, ObservationSet};
    use chrono::NaiveDate;

    const MON: &str = "Monthly Contract (MON)";
    const CAL: &str = "Calendar Year Contract (CAL)";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(category: &str, archive: NaiveDate, start: NaiveDate, value: f64) -> Observation {
        Observation {
            category: category.into(),
            archive_date: archive,
            start_date: start,
            route_average: value,
            index_label: "C5TC_+1MON".into(),
        }
    }

    fn categories() -> Vec<ForecastCategory> {
        vec![ForecastCategory::foldable(MON), ForecastCategory::new(CAL)]
    }

    #[test]
    fn bucket_without_averaging_is_rejected() {
        let options = ForecastOptions {
            average: false,
            bucket: Some(CalendarBucket::Month),
        };
        let err = aggregate(&ObservationSet::default(), &categories(), &[], &options).unwrap_err();
        assert_eq!(err, ConfigError::BucketWithoutAveraging);
    }

    #[test]
    fn raw_mode_passes_each_snapshot_through() {
        let set = ObservationSet::new(vec![
            row(MON, date(2024, 3, 1), date(2024, 4, 1), 10.0),
            row(MON, date(2024, 3, 1), date(2024, 5, 1), 11.0),
            row(MON, date(2024, 3, 8), date(2024, 4, 1), 12.0),
        ]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 3, 1), date(2024, 3, 8)],
            &ForecastOptions::raw(),
        )
        .unwrap();

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label, format!("{MON} (2024-03-01)"));
        assert_eq!(curves[0].points.len(), 2);
        assert_eq!(
            curves[0].points[0].instrument.as_deref(),
            Some("+1MON")
        );
        assert_eq!(curves[1].archive_date, Some(date(2024, 3, 8)));
    }

    #[test]
    fn ungrouped_average_pools_matching_start_dates() {
        let set = ObservationSet::new(vec![
            row(MON, date(2024, 3, 1), date(2024, 4, 1), 10.0),
            row(MON, date(2024, 3, 8), date(2024, 4, 1), 14.0),
            row(MON, date(2024, 3, 8), date(2024, 5, 1), 20.0),
        ]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 3, 1), date(2024, 3, 8)],
            &ForecastOptions::averaged(),
        )
        .unwrap();

        assert_eq!(curves.len(), 1);
        let curve = &curves[0];
        assert_eq!(curve.label, format!("{MON} (Average)"));
        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.points[0].route_average, 12.0);
        // start date seen in only one snapshot: averaging one item is a no-op
        assert_eq!(curve.points[1].route_average, 20.0);
    }

    #[test]
    fn month_groups_need_more_than_one_snapshot() {
        let set = ObservationSet::new(vec![
            // two snapshots spanning {2024-05}
            row(MON, date(2024, 4, 1), date(2024, 5, 10), 10.0),
            row(MON, date(2024, 4, 8), date(2024, 5, 20), 20.0),
            // a lone snapshot spanning {2024-06}
            row(MON, date(2024, 5, 1), date(2024, 6, 10), 30.0),
        ]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 4, 1), date(2024, 4, 8), date(2024, 5, 1)],
            &ForecastOptions::bucketed(CalendarBucket::Month),
        )
        .unwrap();

        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, format!("{MON} - 2024-05"));
        assert_eq!(curves[0].points.len(), 2);
    }

    #[test]
    fn three_snapshots_sharing_a_month_set_merge_into_one_group() {
        let dates = [date(2024, 4, 1), date(2024, 4, 8), date(2024, 4, 15)];
        let mut rows = Vec::new();
        for (offset, archive) in dates.iter().enumerate() {
            rows.push(row(MON, *archive, date(2024, 5, 1), 10.0 + offset as f64));
        }
        let set = ObservationSet::new(rows);

        let grouped = aggregate(
            &set,
            &categories(),
            &dates,
            &ForecastOptions::bucketed(CalendarBucket::Month),
        )
        .unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].points.len(), 1);
        assert_eq!(grouped[0].points[0].route_average, 11.0);

        let pooled = aggregate(&set, &categories(), &dates, &ForecastOptions::averaged()).unwrap();
        assert_eq!(pooled.len(), 1);
        assert_eq!(pooled[0].points[0].route_average, 11.0);
    }

    #[test]
    fn quarter_straddling_snapshot_keeps_only_its_first_quarter() {
        let set = ObservationSet::new(vec![
            // snapshot touching Q2 and Q3: keyed to Q2 only
            row(MON, date(2024, 5, 1), date(2024, 6, 1), 10.0),
            row(MON, date(2024, 5, 1), date(2024, 7, 1), 20.0),
            // snapshot fully inside Q3
            row(MON, date(2024, 6, 3), date(2024, 7, 1), 40.0),
        ]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 5, 1), date(2024, 6, 3)],
            &ForecastOptions::bucketed(CalendarBucket::MonthFoldedToQuarter),
        )
        .unwrap();

        assert_eq!(curves.len(), 2);
        let q2 = &curves[0];
        let q3 = &curves[1];
        assert_eq!(q2.label, format!("{MON} - 2024-Q2"));
        assert_eq!(q3.label, format!("{MON} - 2024-Q3"));
        // the straddler's July point stays in the Q2 group...
        assert_eq!(q2.points.len(), 2);
        assert_eq!(q2.points[1].route_average, 20.0);
        // ...and does not dilute the Q3 group's average
        assert_eq!(q3.points.len(), 1);
        assert_eq!(q3.points[0].route_average, 40.0);
    }

    #[test]
    fn non_foldable_category_falls_back_to_month_grouping() {
        let set = ObservationSet::new(vec![
            row(CAL, date(2024, 3, 1), date(2025, 1, 1), 10.0),
            row(CAL, date(2024, 3, 8), date(2025, 1, 1), 20.0),
        ]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 3, 1), date(2024, 3, 8)],
            &ForecastOptions::bucketed(CalendarBucket::MonthFoldedToQuarter),
        )
        .unwrap();

        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, format!("{CAL} - 2025-01"));
        assert_eq!(curves[0].points[0].route_average, 15.0);
    }

    #[test]
    fn category_without_points_is_skipped_silently() {
        let set = ObservationSet::new(vec![row(MON, date(2024, 3, 1), date(2024, 4, 1), 10.0)]);
        let curves = aggregate(
            &set,
            &categories(),
            &[date(2024, 3, 1)],
            &ForecastOptions::averaged(),
        )
        .unwrap();
        assert_eq!(curves.len(), 1);
        assert!(curves.iter().all(|curve| curve.category == MON));
    }
}

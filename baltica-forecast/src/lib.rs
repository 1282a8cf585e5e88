#![deny(missing_docs)]

//! Forecast-curve aggregation across archive-date snapshots.
//!
//! Each selected archive date is one snapshot of the forward curve. The
//! aggregator either passes the raw per-snapshot curves through or averages
//! them, optionally grouping snapshots into calendar buckets first.

/// Averaging modes and the aggregation entry point.
pub mod aggregate;
/// Per-archive-date snapshot views.
pub mod snapshot;
/// Instrument-keyed pivot tables over raw curves.
pub mod table;

pub use crate::aggregate::{
    aggregate, CalendarBucket, CurvePoint, ForecastCurve, ForecastOptions,
};
pub use crate::snapshot::{ForecastCategory, ForecastSnapshot};
pub use crate::table::{pivot, CurveTable, CurveTableRow};

#![deny(missing_docs)]

//! Ratio signals between two index categories.
//!
//! Pairs two categories' observations date-for-date, derives the ratio
//! series, and emits discrete threshold-crossing events deduplicated to at
//! most one per calendar month and direction.

/// Threshold-crossing detection and monthly deduplication.
pub mod detector;
/// Inner-join ratio construction.
pub mod ratio;

pub use crate::detector::{detect, RatioAnalysis, SignalKind, ThresholdSignal};
pub use crate::ratio::{ratio_series, RatioPoint};

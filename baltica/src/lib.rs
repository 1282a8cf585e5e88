//! Unified facade over the Baltica analytics crates.
//!
//! Callers that hold an observation table and user-chosen parameters get the
//! whole analytics surface from this one crate: rolling/exponential
//! indicators, cross-index ratio signals, and forecast-curve aggregation.

pub use baltica_core as core;
pub use baltica_forecast as forecast;
pub use baltica_indicators as indicators;
pub use baltica_signals as signals;

pub use baltica_core::{
    month_key, quarter_number, quarter_start, AnalyticsResult, ConfigError, DisplayWindow,
    MonthKey, Observation, ObservationSet, Series,
};
pub use baltica_forecast::{
    aggregate, pivot, CalendarBucket, CurvePoint, CurveTable, ForecastCategory, ForecastCurve,
    ForecastOptions, ForecastSnapshot,
};
pub use baltica_indicators::{
    compute as compute_indicators, IndicatorPoint, IndicatorSeries, IndicatorToggles,
};
pub use baltica_signals::{
    detect as detect_signals, RatioAnalysis, RatioPoint, SignalKind, ThresholdSignal,
};

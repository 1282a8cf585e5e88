//! Evaluates a set of indicator toggles over one category's full history and
//! crops the derived series to the caller's display window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use baltica_core::{AnalyticsResult, DisplayWindow, Series};

use crate::core::Indicator;
use crate::indicators::{Ewma, RollingStd, Sma};

/// Which derived columns the caller wants. Any subset is valid; rolling-std
/// toggles are only useful next to their same-window SMA, but the engine
/// does not enforce the pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorToggles {
    /// 90-observation simple moving average.
    pub sma_90: bool,
    /// 200-observation simple moving average.
    pub sma_200: bool,
    /// 30-span exponential weighted mean.
    pub ewma_30: bool,
    /// 90-span exponential weighted mean.
    pub ewma_90: bool,
    /// 90-observation rolling sample std.
    pub rolling_std_90: bool,
    /// 200-observation rolling sample std.
    pub rolling_std_200: bool,
}

impl IndicatorToggles {
    /// Every indicator enabled.
    pub const ALL: Self = Self {
        sma_90: true,
        sma_200: true,
        ewma_30: true,
        ewma_90: true,
        rolling_std_90: true,
        rolling_std_200: true,
    };

    /// True when at least one indicator is enabled.
    pub fn any(&self) -> bool {
        self.sma_90
            || self.sma_200
            || self.ewma_30
            || self.ewma_90
            || self.rolling_std_90
            || self.rolling_std_200
    }
}

/// One position on the archive-date axis with whatever derived values the
/// toggles asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Date this observation was recorded.
    pub archive_date: NaiveDate,
    /// The raw observed value at this position.
    pub route_average: f64,
    /// 90-observation SMA, if enabled.
    pub sma_90: Option<f64>,
    /// 200-observation SMA, if enabled.
    pub sma_200: Option<f64>,
    /// 30-span EWMA, if enabled.
    pub ewma_30: Option<f64>,
    /// 90-span EWMA, if enabled.
    pub ewma_90: Option<f64>,
    /// 90-observation rolling std, if enabled and the window is full.
    pub rolling_std_90: Option<f64>,
    /// 200-observation rolling std, if enabled and the window is full.
    pub rolling_std_200: Option<f64>,
}

impl IndicatorPoint {
    /// `[SMA - std, SMA + std]` envelope for the 90 window, when both sides
    /// are present.
    pub fn band_90(&self) -> Option<(f64, f64)> {
        match (self.sma_90, self.rolling_std_90) {
            (Some(mean), Some(std)) => Some((mean - std, mean + std)),
            _ => None,
        }
    }

    /// `[SMA - std, SMA + std]` envelope for the 200 window.
    pub fn band_200(&self) -> Option<(f64, f64)> {
        match (self.sma_200, self.rolling_std_200) {
            (Some(mean), Some(std)) => Some((mean - std, mean + std)),
            _ => None,
        }
    }
}

/// Derived series for one category, restricted to the display window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    /// Category the points were derived from.
    pub category: String,
    /// Windowed points in archive-date order.
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Number of windowed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the window contains no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Runs the enabled indicators over the series' full history, then crops the
/// result to `window`.
///
/// Indicator values at a position depend only on observations at or before
/// that position, so the crop preserves continuity across the window's left
/// edge. An empty series yields an empty result, not an error.
pub fn compute(
    series: &Series,
    toggles: IndicatorToggles,
    window: DisplayWindow,
) -> AnalyticsResult<IndicatorSeries> {
    window.validate()?;

    let mut sma_90 = toggles.sma_90.then(|| Sma::new(90)).transpose()?;
    let mut sma_200 = toggles.sma_200.then(|| Sma::new(200)).transpose()?;
    let mut ewma_30 = toggles.ewma_30.then(|| Ewma::new(30)).transpose()?;
    let mut ewma_90 = toggles.ewma_90.then(|| Ewma::new(90)).transpose()?;
    let mut rolling_std_90 = toggles
        .rolling_std_90
        .then(|| RollingStd::new(90))
        .transpose()?;
    let mut rolling_std_200 = toggles
        .rolling_std_200
        .then(|| RollingStd::new(200))
        .transpose()?;

    let mut points = Vec::new();
    for (archive_date, value) in series.values() {
        let point = IndicatorPoint {
            archive_date,
            route_average: value,
            sma_90: sma_90.as_mut().and_then(|ind| ind.next(value)),
            sma_200: sma_200.as_mut().and_then(|ind| ind.next(value)),
            ewma_30: ewma_30.as_mut().and_then(|ind| ind.next(value)),
            ewma_90: ewma_90.as_mut().and_then(|ind| ind.next(value)),
            rolling_std_90: rolling_std_90.as_mut().and_then(|ind| ind.next(value)),
            rolling_std_200: rolling_std_200.as_mut().and_then(|ind| ind.next(value)),
        };
        if window.contains(archive_date) {
            points.push(point);
        }
    }

    debug!(
        category = series.category(),
        history = series.len(),
        windowed = points.len(),
        "computed indicator series"
    );

    Ok(IndicatorSeries {
        category: series.category().to_string(),
        points,
    })
}

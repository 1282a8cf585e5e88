#![deny(missing_docs)]

//! Composable rolling and exponential indicators for observation series.
//!
//! The building blocks are streaming: each indicator consumes one value at a
//! time through [`Indicator::next`], so the engine can run the full history
//! once and crop the result to the caller's display window afterwards.

/// Foundational trait shared by all indicators.
pub mod core;
/// The per-series evaluation engine.
pub mod engine;
/// Built-in indicator implementations.
pub mod indicators;

pub use crate::core::Indicator;
pub use crate::engine::{compute, IndicatorPoint, IndicatorSeries, IndicatorToggles};
pub use crate::indicators::{Ewma, RollingStd, Sma};

//! Core domain types shared by the Baltica analytics crates.
//!
//! The caller owns the observation table; everything here is a borrowed view
//! or a working copy of it. Nothing in this crate mutates the caller's rows.

pub mod calendar;
pub mod error;
pub mod observation;
pub mod series;
pub mod window;

pub use crate::calendar::{month_key, quarter_number, quarter_start, MonthKey};
pub use crate::error::{AnalyticsResult, ConfigError};
pub use crate::observation::Observation;
pub use crate::series::{ObservationSet, Series};
pub use crate::window::DisplayWindow;

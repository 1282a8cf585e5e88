//! Built-in indicator implementations provided by the crate.

pub mod ewma;
pub mod rolling_std;
pub mod sma;

pub use ewma::Ewma;
pub use rolling_std::RollingStd;
pub use sma::Sma;

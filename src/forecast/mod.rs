//! Baseline balance projection and summary statistics.

pub mod engine;
pub mod summary;

pub use engine::{ForecastEngine, ForecastPoint, PointKind};
pub use summary::{summarize, ForecastSummary};

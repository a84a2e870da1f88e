//! What-if scenarios layered over a baseline forecast.

pub mod overlay;
pub mod scenario;

pub use overlay::apply_scenarios;
pub use scenario::{ScenarioEvent, ScenarioFrequency};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forecast::{summarize, ForecastPoint, ForecastSummary};

/// Baseline and scenario-adjusted summaries side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub baseline: ForecastSummary,
    pub adjusted: ForecastSummary,
    pub projected_delta: Decimal,
    pub lowest_delta: Decimal,
}

/// Summarizes both series against the same opening `current_balance`.
pub fn compare(
    baseline: &[ForecastPoint],
    adjusted: &[ForecastPoint],
    current_balance: Decimal,
    horizon_days: u32,
) -> ScenarioComparison {
    let baseline = summarize(baseline, current_balance, horizon_days);
    let adjusted = summarize(adjusted, current_balance, horizon_days);
    ScenarioComparison {
        projected_delta: adjusted.projected_balance - baseline.projected_balance,
        lowest_delta: adjusted.lowest_balance - baseline.lowest_balance,
        baseline,
        adjusted,
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::ForecastPoint;

/// Headline statistics for a finished forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub current_balance: Decimal,
    pub projected_balance: Decimal,
    pub highest_balance: Decimal,
    pub lowest_balance: Decimal,
    pub days_until_negative: Option<usize>,
    pub average_daily_change: Decimal,
}

/// Reduces a series to its summary.
///
/// An empty series reports `current_balance` for every balance field. A zero
/// horizon reports an average daily change of zero.
pub fn summarize(
    series: &[ForecastPoint],
    current_balance: Decimal,
    horizon_days: u32,
) -> ForecastSummary {
    let projected_balance = series
        .last()
        .map(|point| point.balance)
        .unwrap_or(current_balance);

    let (highest_balance, lowest_balance) = match series.first() {
        Some(first) => series.iter().skip(1).fold(
            (first.balance, first.balance),
            |(high, low), point| (high.max(point.balance), low.min(point.balance)),
        ),
        None => (current_balance, current_balance),
    };

    let days_until_negative = series
        .iter()
        .position(|point| point.balance < Decimal::ZERO);

    let average_daily_change = if horizon_days == 0 {
        Decimal::ZERO
    } else {
        (projected_balance - current_balance) / Decimal::from(horizon_days)
    };

    ForecastSummary {
        current_balance,
        projected_balance,
        highest_balance,
        lowest_balance,
        days_until_negative,
        average_daily_change,
    }
}

//! Stable entry points for callers (CLI, web handlers, bindings).
//!
//! Every function here is a pure computation over the supplied inputs; nothing
//! is cached between calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::errors::Result;
use crate::forecast::{ForecastEngine, ForecastPoint, ForecastSummary};
use crate::ledger::{
    schedule, within_lookback, ForecastInput, RecurringRule, ScheduledOccurrence, Transaction,
    DUE_SOON_WINDOW_DAYS,
};
use crate::simulation::{compare, ScenarioComparison, ScenarioEvent};

/// Projects the baseline series starting from the local calendar date.
pub fn generate_forecast(
    history: &[Transaction],
    rules: &[RecurringRule],
    current_balance: Decimal,
    horizon_days: u32,
) -> Result<Vec<ForecastPoint>> {
    ForecastEngine::today().project(history, rules, current_balance, horizon_days)
}

/// Returns a scenario-adjusted copy of `baseline`.
pub fn apply_scenarios(
    baseline: &[ForecastPoint],
    scenarios: &[ScenarioEvent],
) -> Result<Vec<ForecastPoint>> {
    crate::simulation::apply_scenarios(baseline, scenarios)
}

/// Derives headline statistics from a finished series.
pub fn summarize(
    series: &[ForecastPoint],
    current_balance: Decimal,
    horizon_days: u32,
) -> ForecastSummary {
    crate::forecast::summarize(series, current_balance, horizon_days)
}

/// Knobs for [`forecast_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub horizon_days: u32,
    /// Trailing history window; `None` uses the history exactly as supplied.
    pub lookback_months: Option<u32>,
    pub due_soon_days: i64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            horizon_days: ForecastConfig::default_horizon_days(),
            lookback_months: None,
            due_soon_days: DUE_SOON_WINDOW_DAYS,
        }
    }
}

impl From<&ForecastConfig> for ReportOptions {
    fn from(config: &ForecastConfig) -> Self {
        Self {
            horizon_days: config.horizon_days,
            lookback_months: Some(config.lookback_months),
            due_soon_days: config.due_soon_days,
        }
    }
}

/// Everything a caller renders for one forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub reference_date: NaiveDate,
    pub horizon_days: u32,
    pub baseline: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted: Option<Vec<ForecastPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ScenarioComparison>,
    pub schedule: Vec<ScheduledOccurrence>,
}

impl ForecastReport {
    /// The scenario-adjusted series when scenarios were supplied, else the baseline.
    pub fn effective_series(&self) -> &[ForecastPoint] {
        self.adjusted.as_deref().unwrap_or(&self.baseline)
    }
}

/// Runs the full pipeline: baseline projection, optional scenario overlay,
/// summaries, and the recurring schedule inside the horizon.
pub fn forecast_report(
    input: &ForecastInput,
    reference: NaiveDate,
    options: ReportOptions,
) -> Result<ForecastReport> {
    input.validate()?;

    let history = match options.lookback_months {
        Some(months) => within_lookback(&input.transactions, reference, months),
        None => input.transactions.clone(),
    };

    let engine = ForecastEngine::new(reference);
    let baseline = engine.project(
        &history,
        &input.recurring,
        input.current_balance,
        options.horizon_days,
    )?;
    let summary = summarize(&baseline, input.current_balance, options.horizon_days);

    let (adjusted, comparison) = if input.scenarios.is_empty() {
        (None, None)
    } else {
        let adjusted = apply_scenarios(&baseline, &input.scenarios)?;
        let comparison = compare(
            &baseline,
            &adjusted,
            input.current_balance,
            options.horizon_days,
        );
        (Some(adjusted), Some(comparison))
    };

    let schedule = schedule(
        &input.recurring,
        reference,
        options.horizon_days,
        options.due_soon_days,
    );

    debug!(
        %reference,
        horizon_days = options.horizon_days,
        history = history.len(),
        scenarios = input.scenarios.len(),
        scheduled = schedule.len(),
        "built forecast report"
    );

    Ok(ForecastReport {
        reference_date: reference,
        horizon_days: options.horizon_days,
        baseline,
        summary,
        adjusted,
        comparison,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FlowKind, Frequency};
    use crate::simulation::ScenarioFrequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn report_without_scenarios_has_no_overlay() {
        let mut input = ForecastInput::new(Decimal::new(100, 0));
        input.recurring.push(RecurringRule::new(
            Decimal::new(40, 0),
            FlowKind::Expense,
            Frequency::Monthly,
            date(2024, 5, 3),
        ));
        let report = forecast_report(&input, date(2024, 5, 1), ReportOptions::default())
            .expect("report");
        assert_eq!(report.baseline.len(), 31);
        assert!(report.adjusted.is_none());
        assert_eq!(report.effective_series(), report.baseline.as_slice());
        assert_eq!(report.schedule.len(), 1);
        assert_eq!(report.summary.projected_balance, Decimal::new(60, 0));
    }

    #[test]
    fn lookback_drops_old_history() {
        let mut input = ForecastInput::new(Decimal::ZERO);
        input
            .transactions
            .push(Transaction::income(Decimal::new(3000, 0), date(2023, 1, 10)));
        let options = ReportOptions {
            horizon_days: 5,
            lookback_months: Some(6),
            due_soon_days: 7,
        };
        let report = forecast_report(&input, date(2024, 5, 1), options).expect("report");
        assert!(report.baseline.iter().all(|p| p.balance.is_zero()));
    }

    #[test]
    fn scenarios_produce_comparison() {
        let mut input = ForecastInput::new(Decimal::new(10, 0));
        input.scenarios.push(ScenarioEvent::new(
            "Trip",
            Decimal::new(25, 0),
            FlowKind::Expense,
            date(2024, 5, 2),
            ScenarioFrequency::Once,
        ));
        let options = ReportOptions {
            horizon_days: 3,
            ..ReportOptions::default()
        };
        let report = forecast_report(&input, date(2024, 5, 1), options).expect("report");
        let comparison = report.comparison.expect("comparison");
        assert_eq!(comparison.projected_delta, Decimal::new(-25, 0));
        assert_eq!(comparison.adjusted.days_until_negative, Some(1));
        assert_eq!(report.baseline[1].balance, Decimal::new(10, 0));
    }

    #[test]
    fn comparison_baseline_matches_report_summary() {
        let mut input = ForecastInput::new(Decimal::new(100, 0));
        input
            .transactions
            .push(Transaction::income(Decimal::new(300, 0), date(2024, 4, 12)));
        input.scenarios.push(ScenarioEvent::new(
            "Bonus",
            Decimal::new(40, 0),
            FlowKind::Income,
            date(2024, 5, 4),
            ScenarioFrequency::Once,
        ));
        let options = ReportOptions {
            horizon_days: 10,
            ..ReportOptions::default()
        };
        let report = forecast_report(&input, date(2024, 5, 1), options).expect("report");
        let comparison = report.comparison.expect("comparison");
        assert_eq!(comparison.baseline, report.summary);
        assert_eq!(comparison.adjusted.current_balance, Decimal::new(100, 0));
        assert_eq!(report.summary.average_daily_change, Decimal::new(11, 0));
        assert_eq!(comparison.projected_delta, Decimal::new(40, 0));
    }
}

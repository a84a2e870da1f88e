use cashflow_core::{
    api::{forecast_report, ReportOptions},
    init,
    ledger::{FlowKind, ForecastInput, Frequency, RecurringRule},
    simulation::{ScenarioEvent, ScenarioFrequency},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[test]
fn forecast_pipeline_smoke() {
    init();

    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut input = ForecastInput::new(Decimal::new(42, 0));
    input.recurring.push(RecurringRule::new(
        Decimal::new(10, 0),
        FlowKind::Income,
        Frequency::Monthly,
        today,
    ));
    input.scenarios.push(ScenarioEvent::new(
        "Coffee",
        Decimal::new(3, 0),
        FlowKind::Expense,
        today,
        ScenarioFrequency::Weekly,
    ));

    let report = forecast_report(&input, today, ReportOptions::default()).unwrap();
    assert_eq!(report.baseline.len(), 31);
    assert_eq!(report.summary.projected_balance, Decimal::new(52, 0));
    let adjusted = report.adjusted.as_ref().unwrap();
    // Jan 1, 8, 15, 22, 29
    assert_eq!(adjusted.last().unwrap().balance, Decimal::new(37, 0));
}

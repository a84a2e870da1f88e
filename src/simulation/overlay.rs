use rust_decimal::Decimal;
use tracing::debug;

use super::scenario::ScenarioEvent;
use crate::errors::Result;
use crate::forecast::ForecastPoint;

/// Layers scenario events over a baseline series and returns the adjusted copy.
///
/// Each occurrence adds its impact to that day's change and to the balance of
/// that day and every later day. Contributions are summed, so the order of
/// `scenarios` does not affect the result. The baseline is never modified.
pub fn apply_scenarios(
    baseline: &[ForecastPoint],
    scenarios: &[ScenarioEvent],
) -> Result<Vec<ForecastPoint>> {
    for scenario in scenarios {
        scenario.validate()?;
    }

    let mut adjusted = baseline.to_vec();
    let mut carried = vec![Decimal::ZERO; adjusted.len()];
    let mut occurrences = 0usize;

    for scenario in scenarios {
        let impact = scenario.impact();
        for (idx, point) in baseline.iter().enumerate() {
            if scenario.occurs_on(point.date) {
                adjusted[idx].change += impact;
                carried[idx] += impact;
                occurrences += 1;
            }
        }
    }

    let mut shift = Decimal::ZERO;
    for (point, delta) in adjusted.iter_mut().zip(carried) {
        shift += delta;
        point.balance += shift;
    }

    debug!(
        points = adjusted.len(),
        scenarios = scenarios.len(),
        occurrences,
        "applied scenarios"
    );
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastEngine;
    use crate::ledger::FlowKind;
    use crate::simulation::ScenarioFrequency;
    use chrono::{Days, NaiveDate};

    fn flat_baseline(days: u32) -> (NaiveDate, Vec<ForecastPoint>) {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let series = ForecastEngine::new(today)
            .project(&[], &[], Decimal::ZERO, days)
            .unwrap();
        (today, series)
    }

    #[test]
    fn change_only_lands_on_trigger_day() {
        let (today, baseline) = flat_baseline(6);
        let bill = ScenarioEvent::new(
            "Repair",
            Decimal::new(80, 0),
            FlowKind::Expense,
            today + Days::new(2),
            ScenarioFrequency::Once,
        );
        let adjusted = apply_scenarios(&baseline, &[bill]).unwrap();
        let changes: Vec<_> = adjusted.iter().map(|p| p.change).collect();
        let balances: Vec<_> = adjusted.iter().map(|p| p.balance).collect();
        let minus = Decimal::new(-80, 0);
        let zero = Decimal::ZERO;
        assert_eq!(changes, vec![zero, zero, minus, zero, zero, zero, zero]);
        assert_eq!(balances, vec![zero, zero, minus, minus, minus, minus, minus]);
    }

    #[test]
    fn overlapping_events_compound() {
        let (today, baseline) = flat_baseline(14);
        let weekly = ScenarioEvent::new(
            "Allowance",
            Decimal::new(10, 0),
            FlowKind::Income,
            today,
            ScenarioFrequency::Weekly,
        );
        let once = ScenarioEvent::new(
            "Gift",
            Decimal::new(5, 0),
            FlowKind::Income,
            today + Days::new(7),
            ScenarioFrequency::Once,
        );
        let adjusted = apply_scenarios(&baseline, &[weekly, once]).unwrap();
        assert_eq!(adjusted[7].change, Decimal::new(15, 0));
        assert_eq!(adjusted[7].balance, Decimal::new(25, 0));
        assert_eq!(adjusted[14].balance, Decimal::new(35, 0));
    }

    #[test]
    fn invalid_scenario_is_rejected_before_applying() {
        let (today, baseline) = flat_baseline(3);
        let free = ScenarioEvent::new(
            "Nothing",
            Decimal::ZERO,
            FlowKind::Income,
            today,
            ScenarioFrequency::Once,
        );
        assert!(apply_scenarios(&baseline, &[free]).is_err());
    }
}

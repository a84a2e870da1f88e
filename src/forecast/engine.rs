use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::round_money;
use crate::errors::{ForecastError, Result};
use crate::ledger::{estimate, fires, RecurringRule, Transaction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Current,
    Projected,
}

/// One calendar day of a projected balance series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub change: Decimal,
    pub kind: PointKind,
}

/// Projects a daily balance series from recurring rules and historical averages.
///
/// The engine holds only its reference date ("today"), so repeated calls with the
/// same inputs always produce the same series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastEngine {
    reference: NaiveDate,
}

impl ForecastEngine {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    /// Engine anchored on the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Produces `horizon_days + 1` points, one per day from the reference date.
    ///
    /// Each day's change is the sum of the active rules firing that day plus the
    /// smoothed daily historical net. Balances accumulate unrounded; only the
    /// emitted figures are rounded to cents.
    pub fn project(
        &self,
        history: &[Transaction],
        rules: &[RecurringRule],
        current_balance: Decimal,
        horizon_days: u32,
    ) -> Result<Vec<ForecastPoint>> {
        validate_inputs(history, rules)?;

        let active: Vec<&RecurringRule> = rules.iter().filter(|rule| rule.is_active).collect();
        let daily_estimate = estimate(history)?.daily_net();
        debug!(
            reference = %self.reference,
            horizon_days,
            history = history.len(),
            active_rules = active.len(),
            %daily_estimate,
            "projecting forecast"
        );

        let last_day = self
            .reference
            .checked_add_days(Days::new(horizon_days.into()))
            .ok_or_else(|| {
                ForecastError::validation(
                    "horizon",
                    format!("{horizon_days} days from {} exceeds the calendar", self.reference),
                )
            })?;

        let mut series = Vec::new();
        let mut running_balance = current_balance;
        let days = self.reference.iter_days().take_while(|day| *day <= last_day);
        for (offset, date) in days.enumerate() {
            let daily_change = active
                .iter()
                .filter(|rule| fires(rule, date))
                .try_fold(daily_estimate, |total, rule| total.checked_add(rule.signed_amount()))
                .ok_or_else(|| out_of_range(date))?;
            running_balance = running_balance
                .checked_add(daily_change)
                .ok_or_else(|| out_of_range(date))?;

            series.push(ForecastPoint {
                date,
                balance: round_money(running_balance),
                change: round_money(daily_change),
                kind: if offset == 0 {
                    PointKind::Current
                } else {
                    PointKind::Projected
                },
            });
        }

        Ok(series)
    }
}

fn out_of_range(date: NaiveDate) -> ForecastError {
    ForecastError::validation(
        format!("forecast day {date}"),
        "balance exceeds the supported amount range",
    )
}

fn validate_inputs(history: &[Transaction], rules: &[RecurringRule]) -> Result<()> {
    let checked = history
        .iter()
        .try_for_each(Transaction::validate)
        .and_then(|_| rules.iter().try_for_each(RecurringRule::validate));
    if let Err(err) = &checked {
        warn!(error = %err, "rejecting forecast inputs");
    }
    checked
}

//! Smoothed cash-flow estimates derived from historical transactions.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{FlowKind, Transaction};
use crate::errors::{ForecastError, Result};

/// Fixed month length used to turn monthly averages into a daily figure.
pub const DAYS_PER_MONTH: u32 = 30;

/// Average income and expense totals per calendar month present in the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverages {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl MonthlyAverages {
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    /// Net monthly flow spread over a 30-day month.
    pub fn daily_net(&self) -> Decimal {
        self.net() / Decimal::from(DAYS_PER_MONTH)
    }
}

/// Groups transactions by `YYYY-MM` and averages each side across the
/// number of distinct months present.
///
/// Totals that exceed `Decimal`'s range are reported as a validation error.
pub fn estimate(transactions: &[Transaction]) -> Result<MonthlyAverages> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for txn in transactions {
        let bucket = months
            .entry((txn.date.year(), txn.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        let total = match txn.kind {
            FlowKind::Income => &mut bucket.0,
            FlowKind::Expense => &mut bucket.1,
        };
        *total = total
            .checked_add(txn.amount)
            .ok_or_else(|| overflow(format!("transaction {}", txn.id)))?;
    }

    if months.is_empty() {
        return Ok(MonthlyAverages::default());
    }

    let count = Decimal::from(months.len());
    let (income, expenses) = months
        .values()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), (inc, exp)| {
            Some((income.checked_add(*inc)?, expenses.checked_add(*exp)?))
        })
        .ok_or_else(|| overflow("history".to_string()))?;

    Ok(MonthlyAverages {
        total_income: income / count,
        total_expenses: expenses / count,
    })
}

fn overflow(record: String) -> ForecastError {
    ForecastError::validation(record, "monthly totals exceed the supported amount range")
}

/// Keeps transactions dated within the trailing `months` calendar months,
/// i.e. after `reference - months` and no later than `reference`.
pub fn within_lookback(
    transactions: &[Transaction],
    reference: NaiveDate,
    months: u32,
) -> Vec<Transaction> {
    let start = reference
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    transactions
        .iter()
        .filter(|txn| txn.date > start && txn.date <= reference)
        .cloned()
        .collect()
}

#![allow(dead_code)]

use cashflow_core::forecast::{ForecastEngine, ForecastPoint};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn dec(units: i64) -> Decimal {
    Decimal::from(units)
}

pub fn offset(start: NaiveDate, days: u64) -> NaiveDate {
    start + Days::new(days)
}

/// Zero-history, zero-rule baseline starting at `today`.
pub fn flat_baseline(today: NaiveDate, balance: Decimal, horizon_days: u32) -> Vec<ForecastPoint> {
    ForecastEngine::new(today)
        .project(&[], &[], balance, horizon_days)
        .expect("flat baseline")
}

pub fn balances(series: &[ForecastPoint]) -> Vec<Decimal> {
    series.iter().map(|point| point.balance).collect()
}

pub fn changes(series: &[ForecastPoint]) -> Vec<Decimal> {
    series.iter().map(|point| point.change).collect()
}

#![doc(test(attr(deny(warnings))))]

//! Cash-flow forecasting core: projects a daily account balance from historical
//! transactions and recurring rules, overlays what-if scenarios, and reduces the
//! result to headline statistics.
//!
//! ```
//! use cashflow_core::forecast::{summarize, ForecastEngine};
//! use cashflow_core::ledger::{FlowKind, Frequency, RecurringRule};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let rent = RecurringRule::new(
//!     Decimal::new(900, 0),
//!     FlowKind::Expense,
//!     Frequency::Monthly,
//!     NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
//! );
//! let series = ForecastEngine::new(today)
//!     .project(&[], &[rent], Decimal::new(1000, 0), 30)
//!     .unwrap();
//! let summary = summarize(&series, Decimal::new(1000, 0), 30);
//! assert_eq!(summary.projected_balance, Decimal::new(100, 0));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod simulation;
pub mod utils;

pub use errors::{ForecastError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("cashflow_core tracing initialized");
    });
}

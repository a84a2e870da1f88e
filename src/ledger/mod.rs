//! Input records consumed by the forecasting core and helpers over them.

pub mod dataset;
pub mod history;
pub mod recurring;
pub mod transaction;

pub use dataset::ForecastInput;
pub use history::{estimate, within_lookback, MonthlyAverages, DAYS_PER_MONTH};
pub use recurring::{
    fires, schedule, Frequency, RecurringRule, ScheduledOccurrence, ScheduledStatus,
    DUE_SOON_WINDOW_DAYS,
};
pub use transaction::{FlowKind, Transaction};

use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::FlowKind;
use crate::errors::{ForecastError, Result};

/// Default window, in days, within which an upcoming due date counts as "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

/// A stored definition of a periodically recurring income or expense.
///
/// `next_date` is the anchor occurrence of the rule, not necessarily the next
/// calendar occurrence relative to today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub category_type: FlowKind,
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    #[serde(default = "RecurringRule::default_active")]
    pub is_active: bool,
}

impl RecurringRule {
    pub fn new(
        amount: Decimal,
        category_type: FlowKind,
        frequency: Frequency,
        next_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
            amount,
            category_type,
            frequency,
            next_date,
            is_active: true,
        }
    }

    fn default_active() -> bool {
        true
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn signed_amount(&self) -> Decimal {
        self.category_type.signed(self.amount)
    }

    pub fn fires_on(&self, target: NaiveDate) -> bool {
        fires(self, target)
    }

    /// Classifies the rule's recorded due date against `reference`.
    pub fn status(&self, reference: NaiveDate, due_soon_days: i64) -> ScheduledStatus {
        ScheduledStatus::classify(self.next_date, reference, due_soon_days)
    }

    /// Next anchor after `next_date`, used when a caller marks the current
    /// occurrence as processed. Month and year steps clamp to the month end.
    pub fn following_date(&self) -> Option<NaiveDate> {
        match self.frequency {
            Frequency::Weekly => self.next_date.checked_add_days(Days::new(7)),
            Frequency::Monthly => self.next_date.checked_add_months(Months::new(1)),
            Frequency::Yearly => self.next_date.checked_add_months(Months::new(12)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ForecastError::validation(
                format!("recurring rule {}", self.id),
                format!("amount must be positive, got {}", self.amount),
            ));
        }
        Ok(())
    }
}

/// Decides whether a recurring rule fires on `target`.
///
/// Every rule fires on its literal `next_date`. Monthly rules additionally fire
/// on any later date sharing the anchor's day of month, so an anchor on the
/// 31st never fires in shorter months. Weekly and yearly rules have no
/// periodic check here.
pub fn fires(rule: &RecurringRule, target: NaiveDate) -> bool {
    if target == rule.next_date {
        return true;
    }
    match rule.frequency {
        Frequency::Monthly => target.day() == rule.next_date.day() && target >= rule.next_date,
        Frequency::Weekly | Frequency::Yearly => false,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScheduledStatus {
    Overdue,
    DueSoon,
    Upcoming,
}

impl ScheduledStatus {
    pub fn classify(scheduled: NaiveDate, reference: NaiveDate, due_soon_days: i64) -> Self {
        if scheduled < reference {
            return ScheduledStatus::Overdue;
        }
        // A window reaching past the calendar covers every later date.
        let due_soon = match Duration::try_days(due_soon_days)
            .and_then(|window| reference.checked_add_signed(window))
        {
            Some(cutoff) => scheduled <= cutoff,
            None => due_soon_days > 0,
        };
        if due_soon {
            ScheduledStatus::DueSoon
        } else {
            ScheduledStatus::Upcoming
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScheduledStatus::Overdue => "overdue",
            ScheduledStatus::DueSoon => "due soon",
            ScheduledStatus::Upcoming => "upcoming",
        }
    }
}

/// One date on which an active rule fires inside a forecast horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledOccurrence {
    pub rule_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub signed_amount: Decimal,
    pub status: ScheduledStatus,
}

/// Lists every date in `reference ..= reference + horizon_days` on which an
/// active rule fires, in chronological order.
pub fn schedule(
    rules: &[RecurringRule],
    reference: NaiveDate,
    horizon_days: u32,
    due_soon_days: i64,
) -> Vec<ScheduledOccurrence> {
    let mut occurrences = Vec::new();
    for offset in 0..=u64::from(horizon_days) {
        let Some(date) = reference.checked_add_days(Days::new(offset)) else {
            break;
        };
        for rule in rules.iter().filter(|rule| rule.is_active) {
            if fires(rule, date) {
                occurrences.push(ScheduledOccurrence {
                    rule_id: rule.id,
                    description: rule.description.clone(),
                    date,
                    signed_amount: rule.signed_amount(),
                    status: ScheduledStatus::classify(date, reference, due_soon_days),
                });
            }
        }
    }
    occurrences
}

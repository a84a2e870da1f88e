use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ForecastError, Result};
use crate::ledger::FlowKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioFrequency {
    Once,
    Weekly,
    Monthly,
}

/// A hypothetical cash event layered over a baseline forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub date: NaiveDate,
    pub frequency: ScenarioFrequency,
}

impl ScenarioEvent {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: FlowKind,
        date: NaiveDate,
        frequency: ScenarioFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            date,
            frequency,
        }
    }

    /// Signed effect on the balance of a single occurrence.
    pub fn impact(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    /// Whether the event occurs on `date`.
    ///
    /// Weekly events repeat every seven days from the anchor; monthly events
    /// repeat on the anchor's day of month from the anchor onward.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            ScenarioFrequency::Once => date == self.date,
            ScenarioFrequency::Weekly => {
                let days = (date - self.date).num_days();
                days >= 0 && days % 7 == 0
            }
            ScenarioFrequency::Monthly => date.day() == self.date.day() && date >= self.date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let record = || format!("scenario {}", self.id);
        if self.description.trim().is_empty() {
            return Err(ForecastError::validation(record(), "description is empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ForecastError::validation(
                record(),
                format!("amount must be positive, got {}", self.amount),
            ));
        }
        Ok(())
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{recurring::RecurringRule, transaction::Transaction};
use crate::errors::Result;
use crate::simulation::ScenarioEvent;

/// Already-resolved inputs for one forecast request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInput {
    #[serde(default)]
    pub current_balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioEvent>,
}

impl ForecastInput {
    pub fn new(current_balance: Decimal) -> Self {
        Self {
            current_balance,
            ..Self::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Checks every record, failing on the first malformed one.
    pub fn validate(&self) -> Result<()> {
        for txn in &self.transactions {
            txn.validate()?;
        }
        for rule in &self.recurring {
            rule.validate()?;
        }
        for scenario in &self.scenarios {
            scenario.validate()?;
        }
        Ok(())
    }
}

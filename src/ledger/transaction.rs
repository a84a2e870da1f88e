use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ForecastError, Result};

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Income,
    Expense,
}

impl FlowKind {
    /// Applies the direction to a positive amount: income adds, expense subtracts.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            FlowKind::Income => amount,
            FlowKind::Expense => -amount,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowKind::Income => "income",
            FlowKind::Expense => "expense",
        }
    }
}

/// A historical transaction read from the caller's transaction feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub date: NaiveDate,
    #[serde(default, alias = "category_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(amount: Decimal, kind: FlowKind, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            date,
            category_id: None,
        }
    }

    pub fn income(amount: Decimal, date: NaiveDate) -> Self {
        Self::new(amount, FlowKind::Income, date)
    }

    pub fn expense(amount: Decimal, date: NaiveDate) -> Self {
        Self::new(amount, FlowKind::Expense, date)
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    /// Rejects records whose amount is zero or negative.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ForecastError::validation(
                format!("transaction {}", self.id),
                format!("amount must be positive, got {}", self.amount),
            ));
        }
        Ok(())
    }
}

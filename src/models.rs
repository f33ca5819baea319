// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest amount accepted on input (one quadrillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub saved_amount: Decimal,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// User-entered fields for a transaction that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.description)?;
        require("category", &self.category)?;
        require_positive("amount", self.amount)
    }
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub amount: Decimal,
    pub saved_amount: Decimal,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require_positive("amount", self.amount)?;
        if self.saved_amount.is_sign_negative() {
            return Err(ValidationError::NegativeAmount {
                field: "saved amount",
            });
        }
        if self.saved_amount > self.amount {
            return Err(ValidationError::SavedExceedsTarget {
                saved: self.saved_amount,
                target: self.amount,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewReminder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require_positive("amount", self.amount)
    }
}

/// Partial update for a stored reminder; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    /// `Some("")` (or whitespace) clears the notes.
    pub notes: Option<String>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.due_date.is_none()
            && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(amount) = self.amount {
            require_positive("amount", amount)?;
        }
        Ok(())
    }

    /// Applies the patch on top of `current`, stamping `updated_at`.
    pub fn apply(&self, current: &Reminder, updated_at: NaiveDateTime) -> Reminder {
        Reminder {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            amount: self.amount.unwrap_or(current.amount),
            due_date: self.due_date.unwrap_or(current.due_date),
            notes: match &self.notes {
                Some(n) if n.trim().is_empty() => None,
                Some(n) => Some(n.trim().to_string()),
                None => current.notes.clone(),
            },
            user_id: current.user_id.clone(),
            created_at: current.created_at,
            updated_at,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge { field, value });
    }
    Ok(())
}

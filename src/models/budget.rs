//! Budget model
//!
//! A spending ceiling for one category. The category acts as the key within a
//! budget set; stores keep at most one budget per category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// Persisted shape of a budget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// A per-category spending limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BudgetRecord", into = "BudgetRecord")]
pub struct Budget {
    /// Category this budget applies to
    pub category: String,

    /// Maximum allowed spending (never negative)
    pub limit: Decimal,
}

impl Budget {
    /// Create a budget, rejecting negative limits
    pub fn new(category: impl Into<String>, limit: Decimal) -> LedgerResult<Self> {
        let category = category.into();
        if limit < Decimal::ZERO {
            return Err(LedgerError::InvalidBudget(format!(
                "limit for '{}' must not be negative: {}",
                category, limit
            )));
        }
        Ok(Self { category, limit })
    }

    /// Amount left before the limit is reached (negative when overspent)
    ///
    /// `spent` is the absolute amount spent in this budget's category.
    pub fn remaining(&self, spent: Decimal) -> Decimal {
        self.limit - spent
    }

    /// Check whether the given spending exceeds the limit
    pub fn is_exceeded_by(&self, spent: Decimal) -> bool {
        spent > self.limit
    }

    /// Convert to the persisted record shape
    pub fn to_record(&self) -> BudgetRecord {
        BudgetRecord {
            category: Some(self.category.clone()),
            limit: Some(self.limit.to_string()),
        }
    }

    /// Validate a record and build a budget
    pub fn from_record(record: BudgetRecord) -> LedgerResult<Self> {
        let category = record
            .category
            .ok_or_else(|| LedgerError::InvalidBudget("missing field 'category'".into()))?;
        let raw_limit = record
            .limit
            .ok_or_else(|| LedgerError::InvalidBudget("missing field 'limit'".into()))?;
        let limit = Decimal::from_str(raw_limit.trim()).map_err(|_| {
            LedgerError::InvalidBudget(format!("invalid limit for '{}': {}", category, raw_limit))
        })?;

        Self::new(category, limit)
    }
}

impl TryFrom<BudgetRecord> for Budget {
    type Error = LedgerError;

    fn try_from(record: BudgetRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<Budget> for BudgetRecord {
    fn from(budget: Budget) -> Self {
        budget.to_record()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.limit)
    }
}

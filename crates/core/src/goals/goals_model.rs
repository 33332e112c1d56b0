//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a savings goal.
///
/// Goals are fully owned by the backend; the client holds a transient
/// cached copy per view and replaces the whole list on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    /// Progress percentage as reported by the backend.
    pub percentage: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl Goal {
    /// True once the backend reports the goal as fully funded.
    pub fn is_achieved(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

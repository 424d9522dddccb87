use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Identifier assigned by the budget service. Opaque to the client; services
/// that hand out numeric ids are accepted and carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBudgetId", into = "String")]
pub struct BudgetId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBudgetId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawBudgetId> for BudgetId {
    fn from(raw: RawBudgetId) -> Self {
        match raw {
            RawBudgetId::Text(text) => BudgetId(text),
            RawBudgetId::Number(number) => BudgetId(number.to_string()),
        }
    }
}

impl From<BudgetId> for String {
    fn from(id: BudgetId) -> Self {
        id.0
    }
}

impl BudgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BudgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monthly spending ceiling for one category, as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Body of `POST /setBudget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl BudgetRequest {
    pub fn new(category: Category, amount: Decimal) -> Self {
        Self { category, amount }
    }
}

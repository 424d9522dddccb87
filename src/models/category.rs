use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Expense categories a budget can be set for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoodAndDining,
    Transportation,
    Housing,
    Entertainment,
    Healthcare,
    PersonalCare,
    Shopping,
    Travel,
    Education,
    Miscellaneous,
}

impl Category {
    /// Every category in selector order
    pub const ALL: [Category; 10] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Housing,
        Category::Entertainment,
        Category::Healthcare,
        Category::PersonalCare,
        Category::Shopping,
        Category::Travel,
        Category::Education,
        Category::Miscellaneous,
    ];

    /// Wire value sent to and received from the budget service
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "food_and_dining",
            Category::Transportation => "transportation",
            Category::Housing => "housing",
            Category::Entertainment => "entertainment",
            Category::Healthcare => "healthcare",
            Category::PersonalCare => "personal_care",
            Category::Shopping => "shopping",
            Category::Travel => "travel",
            Category::Education => "education",
            Category::Miscellaneous => "miscellaneous",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food and Dining",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::PersonalCare => "Personal Care",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Shopping
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

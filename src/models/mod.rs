pub mod budget;
pub mod category;

pub use budget::{Budget, BudgetId, BudgetRequest};
pub use category::{Category, UnknownCategory};

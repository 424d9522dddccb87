pub mod budgets;
pub mod categories;

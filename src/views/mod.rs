pub mod confirm;
pub mod list;

pub use confirm::{Confirmer, FixedAnswer, TerminalConfirmer};
pub use list::{BudgetListView, BudgetRow, DeleteOutcome, Rendered};

pub mod client;

use async_trait::async_trait;

use crate::error::SyncError;
use crate::models::{Budget, BudgetId, BudgetRequest};
use crate::session::Session;

pub use client::HttpBudgetService;

/// Remote operations on the budget service. Every call carries the session
/// explicitly; success means the service acknowledged with a 2xx status.
#[async_trait]
pub trait BudgetService: Send + Sync {
    /// `POST /setBudget`
    async fn set_budget(&self, session: &Session, request: &BudgetRequest) -> Result<(), SyncError>;

    /// `DELETE /deleteBudget/{id}`
    async fn delete_budget(&self, session: &Session, id: &BudgetId) -> Result<(), SyncError>;

    /// `GET /getBudgets`, the authoritative list used by reload
    async fn list_budgets(&self, session: &Session) -> Result<Vec<Budget>, SyncError>;
}

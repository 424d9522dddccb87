use rust_decimal::Decimal;
use serde::Serialize;

use super::confirm::Confirmer;
use crate::api::BudgetService;
use crate::config::FailureReporting;
use crate::models::{Budget, BudgetId, Category};
use crate::session::Session;
use crate::sync::{self, BudgetStore, DataSync, MutationOutcome};

pub const EMPTY_PLACEHOLDER: &str = "You have not set any budgets.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this budget?";
/// Shown with [`FailureReporting::Inline`] when a delete is not acknowledged
pub const DELETE_FAILED_MESSAGE: &str = "Could not delete budget. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub id: BudgetId,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<Budget> for BudgetRow {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            category: budget.category,
            amount: budget.amount,
        }
    }
}

/// What the list shows for the current collection
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Placeholder(&'static str),
    Table(Vec<BudgetRow>),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// User said no; nothing was sent
    Declined,
    Sent(MutationOutcome),
}

/// Renders the budgets collection and deletes rows on confirmation
#[derive(Debug, Clone, Default)]
pub struct BudgetListView {
    reporting: FailureReporting,
    notice: Option<String>,
}

impl BudgetListView {
    pub fn new(reporting: FailureReporting) -> Self {
        Self {
            reporting,
            notice: None,
        }
    }

    /// Inline failure notice, only ever set with [`FailureReporting::Inline`]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self, store: &BudgetStore) -> Rendered {
        let budgets = store.snapshot();
        if budgets.is_empty() {
            Rendered::Placeholder(EMPTY_PLACEHOLDER)
        } else {
            Rendered::Table(budgets.into_iter().map(BudgetRow::from).collect())
        }
    }

    /// Plain-text table, or the placeholder line when there is nothing to show
    pub fn render_text(&self, store: &BudgetStore) -> String {
        let mut out = String::new();
        if let Some(notice) = &self.notice {
            out.push_str(notice);
            out.push('\n');
        }

        match self.view(store) {
            Rendered::Placeholder(message) => {
                out.push_str(message);
                out.push('\n');
            }
            Rendered::Table(rows) => {
                out.push_str(&format!("{:<38} {:<18} {:>12}\n", "ID", "CATEGORY", "BUDGET"));
                out.push_str(&"-".repeat(70));
                out.push('\n');
                for row in rows {
                    out.push_str(&format!(
                        "{:<38} {:<18} {:>12}\n",
                        row.id.as_str(),
                        row.category.as_str(),
                        row.amount.normalize()
                    ));
                }
            }
        }
        out
    }

    /// Ask first; on yes send `DELETE /deleteBudget/{id}` and reload once if acknowledged.
    /// The row is never removed locally.
    pub async fn delete(
        &mut self,
        id: &BudgetId,
        confirmer: &dyn Confirmer,
        session: &Session,
        service: &dyn BudgetService,
        sync: &dyn DataSync,
    ) -> DeleteOutcome {
        if !confirmer.confirm(DELETE_PROMPT).await {
            tracing::debug!("Delete of budget {} declined", id);
            return DeleteOutcome::Declined;
        }

        let outcome = sync::commit(
            sync,
            session,
            "delete budget",
            service.delete_budget(session, id),
        )
        .await;

        if outcome.is_acknowledged() {
            self.notice = None;
        } else if self.reporting == FailureReporting::Inline {
            self.notice = Some(DELETE_FAILED_MESSAGE.to_string());
        }

        DeleteOutcome::Sent(outcome)
    }
}

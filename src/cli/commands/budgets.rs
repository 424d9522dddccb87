use std::io::Write;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::HttpBudgetService;
use crate::cli::utils::{output_budgets, output_success, output_warning};
use crate::cli::OutputFormat;
use crate::config::{ClientConfig, FailureReporting};
use crate::error::SyncError;
use crate::form::{BudgetForm, SubmitOutcome};
use crate::models::{BudgetId, Category};
use crate::session::{CredentialStore, GuardOutcome, Navigator, Session, SessionGuard};
use crate::sync::{BudgetStore, DataSync, MutationOutcome, RemoteDataSync};
use crate::views::{BudgetListView, Confirmer, DeleteOutcome};

/// Shown after an acknowledged change whose follow-up reload failed
pub const STALE_WARNING: &str = "Budget list could not be refreshed";

/// Surroundings of a budget command: configuration, where the session comes
/// from, where a missing session is sent, and how results are written
pub struct CommandContext<'a> {
    pub config: &'a ClientConfig,
    pub credentials: &'a dyn CredentialStore,
    pub navigator: &'a dyn Navigator,
    pub output_format: OutputFormat,
}

/// Everything a budget command needs once the session guard has let it in
struct Workspace {
    session: Session,
    service: Arc<HttpBudgetService>,
    sync: RemoteDataSync,
}

fn enter(ctx: &CommandContext<'_>) -> anyhow::Result<Workspace> {
    let session = match SessionGuard::enter(ctx.credentials, ctx.navigator) {
        GuardOutcome::Admitted(session) => session,
        GuardOutcome::Redirected => anyhow::bail!("Authentication required"),
    };

    let service = Arc::new(HttpBudgetService::new(ctx.config)?);
    let sync = RemoteDataSync::new(service.clone(), Arc::new(BudgetStore::new()));

    Ok(Workspace {
        session,
        service,
        sync,
    })
}

/// Silent policy: the failure has been traced and nothing else is shown
fn unacknowledged(reporting: FailureReporting, message: &str) -> anyhow::Result<()> {
    match reporting {
        FailureReporting::Silent => Ok(()),
        FailureReporting::Inline => Err(anyhow::anyhow!("{}", message)),
    }
}

/// The change went through but the list was never loaded: report the
/// success with a warning and no listing
fn applied_stale(
    out: &mut dyn Write,
    output_format: &OutputFormat,
    message: &str,
    mut data: Value,
    err: &SyncError,
) -> anyhow::Result<()> {
    let warning = format!("{}: {}", STALE_WARNING, err);
    data["warning"] = json!(warning);
    output_success(out, output_format, message, Some(data))?;
    output_warning(out, output_format, &warning)
}

pub async fn list(ctx: &CommandContext<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    let ws = enter(ctx)?;
    ws.sync.reload(&ws.session).await?;

    let view = BudgetListView::new(ctx.config.sync.failure_reporting);
    output_budgets(out, &ctx.output_format, &view, ws.sync.store())
}

pub async fn set(
    ctx: &CommandContext<'_>,
    out: &mut dyn Write,
    category: Category,
    amount: String,
) -> anyhow::Result<()> {
    let ws = enter(ctx)?;
    let reporting = ctx.config.sync.failure_reporting;

    let mut form = BudgetForm::new(reporting);
    form.set_category(category);
    form.set_amount(amount.clone());

    let message = format!("Budget set for {}", category.label());
    let data = json!({ "category": category, "amount": amount.trim() });

    match form.submit(&ws.session, ws.service.as_ref(), &ws.sync).await {
        SubmitOutcome::Invalid(err) => Err(err.into()),
        SubmitOutcome::Sent(MutationOutcome::Failed(_)) => {
            unacknowledged(reporting, form.error_message())
        }
        SubmitOutcome::Sent(MutationOutcome::AppliedStale(err)) => {
            applied_stale(out, &ctx.output_format, &message, data, &err)
        }
        SubmitOutcome::Sent(MutationOutcome::Applied) => {
            output_success(out, &ctx.output_format, &message, Some(data))?;
            let view = BudgetListView::new(reporting);
            output_budgets(out, &ctx.output_format, &view, ws.sync.store())
        }
    }
}

pub async fn delete(
    ctx: &CommandContext<'_>,
    out: &mut dyn Write,
    confirmer: &dyn Confirmer,
    id: String,
) -> anyhow::Result<()> {
    let ws = enter(ctx)?;
    let reporting = ctx.config.sync.failure_reporting;
    let id = BudgetId::new(id);

    let mut view = BudgetListView::new(reporting);
    let outcome = view
        .delete(&id, confirmer, &ws.session, ws.service.as_ref(), &ws.sync)
        .await;

    let message = format!("Budget '{}' deleted", id);
    let data = json!({ "id": id });

    match outcome {
        DeleteOutcome::Declined => {
            if let OutputFormat::Text = ctx.output_format {
                writeln!(out, "Delete cancelled")?;
            }
            Ok(())
        }
        DeleteOutcome::Sent(MutationOutcome::Failed(_)) => {
            unacknowledged(reporting, view.notice().unwrap_or_default())
        }
        DeleteOutcome::Sent(MutationOutcome::AppliedStale(err)) => {
            applied_stale(out, &ctx.output_format, &message, data, &err)
        }
        DeleteOutcome::Sent(MutationOutcome::Applied) => {
            output_success(out, &ctx.output_format, &message, Some(data))?;
            output_budgets(out, &ctx.output_format, &view, ws.sync.store())
        }
    }
}

mod common;

use std::sync::Arc;

use anyhow::Result;
use budget_sync::api::BudgetService;
use budget_sync::error::SyncError;
use budget_sync::form::{BudgetForm, SubmitOutcome};
use budget_sync::models::{BudgetRequest, Category};
use budget_sync::sync::{self, BudgetStore, DataSync, MutationOutcome, RemoteDataSync};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::str::FromStr;

fn remote_sync(service: Arc<dyn BudgetService>) -> RemoteDataSync {
    RemoteDataSync::new(service, Arc::new(BudgetStore::new()))
}

#[tokio::test]
async fn travel_budget_is_created_and_reloaded_once() -> Result<()> {
    let service = common::spawn_service().await?;
    let client = Arc::new(service.client());
    let sync = remote_sync(client.clone());
    let mut form = BudgetForm::default();
    form.set_category(Category::Travel);
    form.set_amount("150.50");

    let outcome = form.submit(&common::session(), client.as_ref(), &sync).await;

    assert!(outcome.is_saved());
    assert_eq!(service.state.mutation_count(), 1);
    assert_eq!(service.state.read_count(), 1);

    let budgets = sync.store().snapshot();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category, Category::Travel);
    assert_eq!(budgets[0].amount, Decimal::from_str("150.5")?);
    assert_eq!(sync.store().generation(), 1);

    assert_eq!(form.category(), Category::Shopping);
    assert_eq!(form.amount(), "");
    assert_eq!(form.error_message(), "");
    Ok(())
}

#[tokio::test]
async fn negative_amount_never_reaches_the_service() -> Result<()> {
    let service = common::spawn_service().await?;
    let client = Arc::new(service.client());
    let sync = remote_sync(client.clone());
    let mut form = BudgetForm::default();
    form.set_amount("-5");

    let outcome = form.submit(&common::session(), client.as_ref(), &sync).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(form.error_message(), "Budget must be a positive number.");
    assert_eq!(form.category(), Category::Shopping);
    assert_eq!(service.state.mutation_count(), 0);
    assert_eq!(service.state.read_count(), 0);
    Ok(())
}

#[tokio::test]
async fn server_error_leaves_form_and_skips_reload() -> Result<()> {
    let broken = common::spawn_broken_service(StatusCode::INTERNAL_SERVER_ERROR).await?;
    let client = Arc::new(common::client_for(&broken.base_url));
    let sync = remote_sync(client.clone());
    let mut form = BudgetForm::default();
    form.set_category(Category::Healthcare);
    form.set_amount("80");

    let outcome = form.submit(&common::session(), client.as_ref(), &sync).await;

    match outcome {
        SubmitOutcome::Sent(MutationOutcome::Failed(err)) => assert_eq!(err.status(), Some(500)),
        other => panic!("expected failed mutation, got {:?}", other),
    }
    // Only the POST reached the service; no reload followed
    assert_eq!(broken.hits(), 1);
    assert_eq!(sync.store().generation(), 0);
    assert_eq!(form.category(), Category::Healthcare);
    assert_eq!(form.amount(), "80");
    assert_eq!(form.error_message(), "");
    Ok(())
}

#[tokio::test]
async fn transport_failure_is_reported_not_raised() -> Result<()> {
    let client = Arc::new(common::client_for(&common::unreachable_base_url()));
    let sync = remote_sync(client.clone());
    let mut form = BudgetForm::default();
    form.set_amount("20");

    let outcome = form.submit(&common::session(), client.as_ref(), &sync).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Sent(MutationOutcome::Failed(SyncError::Transport(_)))
    ));
    assert_eq!(form.amount(), "20");
    assert_eq!(sync.store().generation(), 0);
    Ok(())
}

#[tokio::test]
async fn double_submit_produces_two_mutations_and_two_reloads() -> Result<()> {
    let service = common::spawn_service().await?;
    let client = Arc::new(service.client());
    let data = remote_sync(client.clone());
    let session = common::session();
    let request = BudgetRequest::new(Category::Entertainment, Decimal::from(60));

    let (first, second) = futures::join!(
        sync::commit(&data, &session, "set budget", client.set_budget(&session, &request)),
        sync::commit(&data, &session, "set budget", client.set_budget(&session, &request)),
    );

    assert!(first.is_acknowledged());
    assert!(second.is_acknowledged());
    assert_eq!(service.state.mutation_count(), 2);
    assert_eq!(service.state.read_count(), 2);
    assert_eq!(data.store().generation(), 2);
    assert_eq!(data.store().len(), 1);
    Ok(())
}

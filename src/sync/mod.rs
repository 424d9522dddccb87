//! Client-side budget state and its synchronization with the service.
//!
//! [`BudgetStore`] holds the last list the service returned. It is replaced
//! wholesale by [`DataSync::reload`] and never patched locally, so what the
//! views render always lags one round trip behind a mutation.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::api::BudgetService;
use crate::error::SyncError;
use crate::models::Budget;
use crate::session::Session;

/// Shared budgets collection with a single update entry point
#[derive(Debug, Default)]
pub struct BudgetStore {
    budgets: RwLock<Vec<Budget>>,
    generation: AtomicU64,
}

impl BudgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current collection in service order
    pub fn snapshot(&self) -> Vec<Budget> {
        match self.budgets.read() {
            Ok(budgets) => budgets.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self.budgets.read() {
            Ok(budgets) => budgets.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Number of completed replacements
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Swap in the authoritative list. The last call wins.
    pub fn replace(&self, budgets: Vec<Budget>) {
        let mut guard = match self.budgets.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = budgets;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Owner of the budgets collection as seen by the views
#[async_trait]
pub trait DataSync: Send + Sync {
    /// Replace the collection with the service's list for this session
    async fn reload(&self, session: &Session) -> Result<(), SyncError>;

    fn store(&self) -> &BudgetStore;
}

/// [`DataSync`] that reloads from a [`BudgetService`]
pub struct RemoteDataSync {
    service: Arc<dyn BudgetService>,
    store: Arc<BudgetStore>,
}

impl RemoteDataSync {
    pub fn new(service: Arc<dyn BudgetService>, store: Arc<BudgetStore>) -> Self {
        Self { service, store }
    }
}

#[async_trait]
impl DataSync for RemoteDataSync {
    async fn reload(&self, session: &Session) -> Result<(), SyncError> {
        let budgets = self.service.list_budgets(session).await?;
        tracing::debug!("Reloaded {} budgets", budgets.len());
        self.store.replace(budgets);
        Ok(())
    }

    fn store(&self) -> &BudgetStore {
        &self.store
    }
}

/// Result of a create or delete round trip
#[derive(Debug)]
pub enum MutationOutcome {
    /// Acknowledged and the collection was reloaded
    Applied,
    /// Acknowledged, but the follow-up reload failed; the collection is stale
    AppliedStale(SyncError),
    /// Not acknowledged; nothing was reloaded
    Failed(SyncError),
}

impl MutationOutcome {
    pub fn is_acknowledged(&self) -> bool {
        !matches!(self, MutationOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            MutationOutcome::Applied => None,
            MutationOutcome::AppliedStale(err) | MutationOutcome::Failed(err) => Some(err),
        }
    }
}

/// Await a mutation and reload exactly once if the service acknowledged it.
/// Failures are traced and returned; the collection is never touched locally.
pub async fn commit<F>(
    sync: &dyn DataSync,
    session: &Session,
    operation: &'static str,
    mutation: F,
) -> MutationOutcome
where
    F: Future<Output = Result<(), SyncError>> + Send,
{
    if let Err(err) = mutation.await {
        tracing::error!("Failed to {}: {}", operation, err);
        return MutationOutcome::Failed(err);
    }

    match sync.reload(session).await {
        Ok(()) => MutationOutcome::Applied,
        Err(err) => {
            tracing::warn!("{} acknowledged but reload failed: {}", operation, err);
            MutationOutcome::AppliedStale(err)
        }
    }
}

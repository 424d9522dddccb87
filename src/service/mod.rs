//! Development stand-in for the remote budget service.
//!
//! Implements the same HTTP contract the client consumes, keeping budgets in
//! memory and partitioned by the raw `Authorization` token.

pub mod auth;
pub mod error;
pub mod handlers;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::Budget;

#[derive(Clone, Default)]
pub struct ServiceState {
    inner: Arc<ServiceInner>,
}

#[derive(Default)]
struct ServiceInner {
    budgets: RwLock<HashMap<String, Vec<Budget>>>,
    mutations: AtomicUsize,
    reads: AtomicUsize,
}

impl ServiceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledged and rejected `setBudget`/`deleteBudget` calls that got past auth
    pub fn mutation_count(&self) -> usize {
        self.inner.mutations.load(Ordering::SeqCst)
    }

    /// `getBudgets` calls that got past auth
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    pub async fn budgets_for(&self, token: &str) -> Vec<Budget> {
        self.inner
            .budgets
            .read()
            .await
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    fn count_mutation(&self) {
        self.inner.mutations.fetch_add(1, Ordering::SeqCst);
    }

    fn count_read(&self) {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn app(state: ServiceState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Token required
        .route("/setBudget", post(handlers::set_budget))
        .route("/getBudgets", get(handlers::get_budgets))
        .route("/deleteBudget/:id", delete(handlers::delete_budget))
        .with_state(state)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

//! In-crate fakes for the service, sync, navigation and confirmation seams

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::api::BudgetService;
use crate::error::SyncError;
use crate::models::{Budget, BudgetId, BudgetRequest, Category};
use crate::session::{Navigator, Session};
use crate::sync::{BudgetStore, DataSync};
use crate::views::Confirmer;

pub const TEST_TOKEN: &str = "token-123";

pub fn session() -> Session {
    Session::new(TEST_TOKEN).expect("non-empty token")
}

pub fn budget(id: &str, category: Category, amount: i64) -> Budget {
    Budget {
        id: BudgetId::new(id),
        category,
        amount: Decimal::from(amount),
    }
}

fn rejected(operation: &'static str, status: u16) -> SyncError {
    SyncError::Rejected {
        operation,
        status,
        body: "{\"error\":true}".to_string(),
    }
}

/// Records every call and answers with a scripted status
#[derive(Default)]
pub struct FakeBudgetService {
    set_requests: Mutex<Vec<(String, BudgetRequest)>>,
    deleted: Mutex<Vec<(String, BudgetId)>>,
    list_calls: AtomicUsize,
    listing: Mutex<Vec<Budget>>,
    failure_status: Mutex<Option<u16>>,
}

impl FakeBudgetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_listing(&self, budgets: Vec<Budget>) {
        *self.listing.lock().unwrap() = budgets;
    }

    pub fn fail_with_status(&self, status: u16) {
        *self.failure_status.lock().unwrap() = Some(status);
    }

    pub fn set_requests(&self) -> Vec<(String, BudgetRequest)> {
        self.set_requests.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<(String, BudgetId)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.set_requests().len() + self.deleted().len() + self.list_calls()
    }

    fn failure(&self) -> Option<u16> {
        *self.failure_status.lock().unwrap()
    }
}

#[async_trait]
impl BudgetService for FakeBudgetService {
    async fn set_budget(&self, session: &Session, request: &BudgetRequest) -> Result<(), SyncError> {
        self.set_requests
            .lock()
            .unwrap()
            .push((session.token().to_string(), request.clone()));
        match self.failure() {
            Some(status) => Err(rejected("set budget", status)),
            None => Ok(()),
        }
    }

    async fn delete_budget(&self, session: &Session, id: &BudgetId) -> Result<(), SyncError> {
        self.deleted
            .lock()
            .unwrap()
            .push((session.token().to_string(), id.clone()));
        match self.failure() {
            Some(status) => Err(rejected("delete budget", status)),
            None => Ok(()),
        }
    }

    async fn list_budgets(&self, _session: &Session) -> Result<Vec<Budget>, SyncError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(status) => Err(rejected("list budgets", status)),
            None => Ok(self.listing.lock().unwrap().clone()),
        }
    }
}

/// Counts reloads and serves a fixed list
#[derive(Default)]
pub struct FakeDataSync {
    store: BudgetStore,
    next: Mutex<Vec<Budget>>,
    reloads: Mutex<Vec<String>>,
    failing: bool,
}

impl FakeDataSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn serve(&self, budgets: Vec<Budget>) {
        *self.next.lock().unwrap() = budgets;
    }

    pub fn reload_tokens(&self) -> Vec<String> {
        self.reloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSync for FakeDataSync {
    async fn reload(&self, session: &Session) -> Result<(), SyncError> {
        self.reloads.lock().unwrap().push(session.token().to_string());
        if self.failing {
            return Err(rejected("list budgets", 502));
        }
        self.store.replace(self.next.lock().unwrap().clone());
        Ok(())
    }

    fn store(&self) -> &BudgetStore {
        &self.store
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_string());
    }
}

/// Gives a fixed answer and remembers the prompts it was shown
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

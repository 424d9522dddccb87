#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use budget_sync::api::HttpBudgetService;
use budget_sync::config::ClientConfig;
use budget_sync::service::{app, ServiceState};
use budget_sync::session::{Navigator, Session};

pub const TOKEN: &str = "test-session-token";

pub struct TestService {
    pub port: u16,
    pub base_url: String,
    pub state: ServiceState,
}

impl TestService {
    pub fn client(&self) -> HttpBudgetService {
        client_for(&self.base_url)
    }
}

pub fn client_for(base_url: &str) -> HttpBudgetService {
    let config = ClientConfig::production().with_base_url(base_url);
    HttpBudgetService::new(&config).expect("valid test base url")
}

pub fn session() -> Session {
    Session::new(TOKEN).expect("non-empty token")
}

/// Bind a router on a free local port inside the current test runtime
async fn serve(router: Router) -> Result<(u16, String)> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    wait_ready(&base_url, Duration::from_secs(10)).await?;
    Ok((port, base_url))
}

async fn wait_ready(base_url: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let deadline = Instant::now() + timeout;
    loop {
        if Instant::now() > deadline {
            break;
        }
        let url = format!("{}/health", base_url);
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status() == StatusCode::OK {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    anyhow::bail!("service did not become ready on {} within {:?}", base_url, timeout)
}

/// The development budget service with fresh in-memory state
pub async fn spawn_service() -> Result<TestService> {
    let state = ServiceState::new();
    let (port, base_url) = serve(app(state.clone())).await?;
    Ok(TestService { port, base_url, state })
}

/// A service that is up but answers every budget call with `status`
pub struct BrokenService {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl BrokenService {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_broken_service(status: StatusCode) -> Result<BrokenService> {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, "{\"error\":true}")
            }
        });

    let (_, base_url) = serve(router).await?;
    Ok(BrokenService { base_url, hits })
}

/// A service that acknowledges every change but cannot list budgets
pub async fn spawn_stale_service() -> Result<String> {
    let router = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/setBudget", post(|| async { StatusCode::OK }))
        .route("/deleteBudget/:id", delete(|| async { StatusCode::NO_CONTENT }))
        .route("/getBudgets", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

    let (_, base_url) = serve(router).await?;
    Ok(base_url)
}

/// Base URL with nothing listening behind it
pub fn unreachable_base_url() -> String {
    let port = portpicker::pick_unused_port().expect("free port");
    format!("http://127.0.0.1:{}", port)
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

use budget_sync::service::{app, ServiceState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up BUDGET_SERVICE_PORT
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("budget_sync=debug,tower_http=info")),
        )
        .init();

    let app = app(ServiceState::new());

    // Allow tests or deployments to override port via env
    let port = std::env::var("BUDGET_SERVICE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Budget service listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sabi_health_backend::config::ServiceConfig;
use sabi_health_backend::{create_router, initialize_backend, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the domain layer are routed into
    // the tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env();
    info!("Starting Sabi Health API on port {}", config.port);

    let state = initialize_backend(&config)?;
    let app = create_router(state.clone(), &config);

    scheduler::spawn_hourly_checks(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use contact_api::{build_router, AppState};
use contact_core::repositories::{ContactRepository, UserRepository};
use contact_infrastructure::database::{self, PoolOptions};
use contact_infrastructure::{MemoryStore, MySqlContactRepository, MySqlUserRepository};
use contact_shared::config::{AppConfig, DatabaseSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry
    let _log_guard = contact_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting (env: {})...", config.app.name, config.app.env);

    // Connect to store
    let (user_repo, contact_repo) = connect_store(&config.database).await?;

    // Create App State
    let state = AppState::new(user_repo, contact_repo, &config.session);

    // Build router
    let app = build_router(state, Duration::from_secs(config.app.request_timeout_secs));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_store(
    settings: &DatabaseSettings,
) -> anyhow::Result<(Arc<dyn UserRepository>, Arc<dyn ContactRepository>)> {
    if settings.is_memory() {
        warn!("Using in-memory store; data is lost on shutdown");
        let store = Arc::new(MemoryStore::new());
        let users: Arc<dyn UserRepository> = store.clone();
        let contacts: Arc<dyn ContactRepository> = store;
        return Ok((users, contacts));
    }

    info!("Connecting to database...");
    let options = PoolOptions {
        max_connections: settings.max_connections,
        min_connections: settings.min_connections,
        acquire_timeout: Duration::from_secs(settings.acquire_timeout_secs),
    };
    let pool = database::create_pool(&settings.url, &options).await?;
    info!("Database connection established.");

    if settings.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let users: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(pool.clone()));
    let contacts: Arc<dyn ContactRepository> = Arc::new(MySqlContactRepository::new(pool));
    Ok((users, contacts))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

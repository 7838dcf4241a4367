//! Doorman server — session and Basic authentication for a web API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use doorman_api::state::AppState;
use doorman_auth::basic::BasicAuthenticator;
use doorman_auth::password::PasswordHasher;
use doorman_auth::service::AuthService;
use doorman_auth::session::{DurableSessionStore, ExpiringSessionStore, MemorySessionRegistry};
use doorman_core::config::AppConfig;
use doorman_core::error::AppError;
use doorman_core::traits::SessionBacking;
use doorman_database::sessions::PgUserSessionStore;
use doorman_database::users::PgUserStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOORMAN_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Doorman v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let pool = doorman_database::DatabasePool::connect(&config.database).await?;
    doorman_database::migration::run_migrations(pool.pool()).await?;

    let users = Arc::new(PgUserStore::new(pool.pool().clone()));
    let session_records = Arc::new(PgUserSessionStore::new(pool.pool().clone()));

    // Session stack: raw registry → expiry decorator → durable decorator.
    let registry = Arc::new(MemorySessionRegistry::new());
    let expiring = Arc::new(ExpiringSessionStore::new(
        registry,
        config.session.duration_seconds,
    ));
    let sessions: Arc<dyn SessionBacking> = Arc::new(
        DurableSessionStore::open(
            expiring,
            session_records,
            &config.session.snapshot_path,
            config.session.duration_seconds,
        )
        .await?,
    );

    let hasher = Arc::new(PasswordHasher::new());
    let auth = Arc::new(AuthService::new(
        users.clone(),
        sessions,
        hasher.clone(),
        config.auth.clone(),
    ));
    let basic = Arc::new(BasicAuthenticator::new(users, hasher));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(config), auth, basic);
    let router = doorman_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when the process receives SIGINT.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}

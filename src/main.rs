//! AuthHub server — session-credential lifecycle service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authhub_auth::jwt::{TokenIssuer, TokenVerifier};
use authhub_auth::password::PasswordHasher;
use authhub_auth::session::{
    DbPrincipalDirectory, DbRefreshSessionStore, PrincipalDirectory, RefreshSessionStore,
    SessionManager,
};
use authhub_core::clock::SystemClock;
use authhub_core::config::AppConfig;
use authhub_core::error::AppError;
use authhub_database::DatabasePool;
use authhub_database::repositories::message::MessageRepository;
use authhub_database::repositories::refresh_session::RefreshSessionRepository;
use authhub_database::repositories::user::UserRepository;

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHHUB_ENV").unwrap_or_else(|_| "development".to_string());

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

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthHub v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    authhub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let session_repo = Arc::new(RefreshSessionRepository::new(db.pool().clone()));
    let message_repo = Arc::new(MessageRepository::new(db.pool().clone()));

    // Auth system. Token lifetimes are parsed here so a malformed
    // duration string fails startup rather than the first login.
    let clock = Arc::new(SystemClock);
    let issuer = Arc::new(TokenIssuer::new(&config.auth, clock)?);
    let verifier = Arc::new(TokenVerifier::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());

    let store: Arc<dyn RefreshSessionStore> =
        Arc::new(DbRefreshSessionStore::new(Arc::clone(&session_repo)));
    let directory: Arc<dyn PrincipalDirectory> =
        Arc::new(DbPrincipalDirectory::new(Arc::clone(&user_repo)));

    let session_manager = Arc::new(SessionManager::new(
        issuer,
        Arc::clone(&verifier),
        store,
        Arc::clone(&directory),
        password_hasher,
    ));

    let state = authhub_api::AppState {
        db: db.clone(),
        session_manager,
        verifier,
        directory,
        messages: message_repo,
    };

    let app = authhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("AuthHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

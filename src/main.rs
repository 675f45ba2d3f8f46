//! Userdir Server — user directory service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use userdir_api::state::AppState;
use userdir_auth::{JwtEncoder, JwtVerifier, PasswordHasher};
use userdir_core::config::AppConfig;
use userdir_core::error::AppError;
use userdir_database::repositories::UserRepository;
use userdir_database::DatabasePool;
use userdir_service::{AuthService, UserService};

#[tokio::main]
async fn main() {
    let env = std::env::var("USERDIR_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
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
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting userdir v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    userdir_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories, auth, and services ─────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
    let jwt_verifier = Arc::new(JwtVerifier::new(&config.auth));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&hasher),
    ));
    let auth_service = Arc::new(AuthService::new(user_repo, hasher, jwt_encoder));

    // ── Step 3: Bootstrap admin account ──────────────────────────
    user_service
        .ensure_admin(
            &config.auth.bootstrap_admin_email,
            &config.auth.bootstrap_admin_password,
            Duration::from_secs(config.server.request_timeout_seconds),
        )
        .await?;

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        jwt_verifier,
        user_service,
        auth_service,
    };
    let app = userdir_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("userdir server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("userdir server shut down gracefully");
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
        _ = ctrl_c => {
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        },
    }
}

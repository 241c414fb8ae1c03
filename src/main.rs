//! AuthGate server — identity token and session service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authgate_auth::{
    AuthService, DirectoryVerifier, PasswordHasher, PasswordPolicy, SessionStore, TokenCodec,
};
use authgate_core::config::AppConfig;
use authgate_core::error::AppError;
use authgate_core::traits::credentials::CredentialVerifier;
use authgate_database::MemberRepository;
use authgate_registry::RegistryManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHGATE_ENV").unwrap_or_else(|_| "development".to_string());

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
    tracing::info!("Starting AuthGate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = authgate_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    authgate_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Session registry ─────────────────────────────────
    tracing::info!(
        "Initializing session registry (provider: {})...",
        config.registry.provider
    );
    let registry = RegistryManager::new(&config.registry).await?;

    // ── Step 3: Auth system ──────────────────────────────────────
    let token_codec = Arc::new(TokenCodec::new(&config.auth));
    let password_hasher = PasswordHasher::new();
    let member_repo = Arc::new(MemberRepository::new(db_pool.clone()));

    let sessions = Arc::new(SessionStore::new(
        Arc::new(registry.clone()),
        &config.auth,
    ));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(DirectoryVerifier::new(
        Arc::clone(&member_repo),
        password_hasher.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&token_codec),
        sessions,
        verifier,
        &config.auth,
    ));

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = authgate_api::AppState {
        config: Arc::new(config),
        db_pool,
        registry,
        token_codec,
        auth_service,
        member_repo,
        password_hasher,
        password_policy: PasswordPolicy::new(),
    };

    let app = authgate_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthGate server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("AuthGate server shut down gracefully");
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

/// Account Service - entry point.
///
/// Wires configuration, the Postgres store, the lifecycle service and the
/// unverified-account reaper, then serves the REST API.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use account_service::{
    config::Config,
    jobs::{self, reaper::UnverifiedAccountReaper},
    notify::LogNotifier,
    routes,
    security::jwt::TokenIssuer,
    security::verification::VerificationCodes,
    services::AccountService,
    store::postgres::PgAccountStore,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Failed to load configuration from environment");

    tracing::info!(
        host = %config.server_host,
        port = config.server_port,
        "starting account service"
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("database connection pool initialized");

    let algorithm: Algorithm = config
        .jwt_algorithm
        .parse()
        .map_err(|_| format!("unsupported JWT algorithm: {}", config.jwt_algorithm))?;

    let store = Arc::new(PgAccountStore::new(db_pool));
    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        algorithm,
        chrono::Duration::minutes(config.access_token_expire_minutes),
    );
    let codes = VerificationCodes::new(chrono::Duration::minutes(
        config.verification_code_expire_minutes,
    ));

    let service = Arc::new(AccountService::new(
        store.clone(),
        tokens,
        codes,
        Arc::new(LogNotifier),
    ));

    // Reaper runs on its own cadence, decoupled from request handling.
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let reaper = UnverifiedAccountReaper::new(
        store,
        chrono::Duration::seconds(config.reaper_grace_seconds),
    );
    tokio::spawn(jobs::run_reaper_loop(
        reaper,
        Duration::from_secs(config.reaper_interval_seconds),
        shutdown_tx.subscribe(),
    ));

    let app = routes::router(AppState { service });

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
    let _ = shutdown_tx.send(());
}

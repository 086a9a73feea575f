use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnhub_api::config::ServerConfig;
use learnhub_api::payments::client::StripeClient;
use learnhub_api::router::build_app_router;
use learnhub_api::state::AppState;
use learnhub_api::storage::s3::ObjectStorage;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = learnhub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    learnhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    learnhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Object storage ---
    let storage = ObjectStorage::from_env(&config.storage).await;
    tracing::info!(bucket = %config.storage.video_bucket, "Object storage client ready");

    // --- Payment provider ---
    let stripe = StripeClient::new(config.stripe.secret_key.clone());
    if !stripe.is_configured() {
        tracing::warn!("STRIPE_SECRET_KEY is not set; checkout endpoints will fail");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
        stripe: Arc::new(stripe),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}

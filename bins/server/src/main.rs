//! Despacho API Server
//!
//! Main entry point for the correspondence-tracking backend service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use despacho_api::{AppState, create_router};
use despacho_core::storage::{StorageConfig, StorageProvider, StorageService};
use despacho_db::connect;
use despacho_shared::{AppConfig, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "despacho=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Initialize blob storage
    let storage = build_storage(&config.storage)?;
    info!(provider = storage.provider_name(), "Storage configured");

    // Create application state and router
    let state = AppState::new(db, storage);
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the storage service from the configured settings.
fn build_storage(settings: &StorageSettings) -> anyhow::Result<StorageService> {
    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::s3(
            &settings.endpoint,
            &settings.bucket,
            &settings.access_key_id,
            &settings.secret_access_key,
            &settings.region,
        ),
        "local" => StorageProvider::local_fs(&settings.local_root),
        other => anyhow::bail!("unknown storage provider: {other}"),
    };

    let config = StorageConfig::new(provider, &settings.public_base_url)
        .with_max_file_size(settings.max_file_size);

    Ok(StorageService::from_config(config)?)
}

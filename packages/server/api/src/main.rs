use axum::http;
use database::Database;
use dotenv::dotenv;
use library_api::services::catalog::OpenLibraryCatalog;
use library_api::{AppState, Config};
use shared::NoteCalculator;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load Config
    let config = Config::from_env()?;

    // Connect to Database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let catalog = Arc::new(OpenLibraryCatalog::new(&config.external_book_api_url)?);

    let app_state = AppState {
        db: db.clone(),
        notes: NoteCalculator::new(),
        catalog,
    };

    // Setup CORS
    let cors = CorsLayer::new()
        .allow_origin(config.cors_allowed_origin.clone())
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PATCH])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]);

    let app = library_api::router(app_state).layer(cors);

    // Start Server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Library API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Library API stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

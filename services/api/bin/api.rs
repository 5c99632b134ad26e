//! Main Entrypoint for the Study Path API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the curriculum catalog.
//! 3. Initializing the success model, eagerly or on first use.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use studypath_api::{
    config::{Config, ModelInit},
    router::create_router,
    state::{AppState, ServicePredictor},
};
use studypath_core::{curriculum::CatalogRepository, predictor::FileModelLoader};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Curriculum ---
    let curriculum = CatalogRepository::load(config.curriculum_path.as_deref())
        .context("Failed to load curriculum catalog")?;
    info!(
        entries = curriculum.len(),
        source = ?config.curriculum_path,
        "Curriculum catalog loaded."
    );
    if curriculum.is_empty() {
        warn!("Curriculum catalog has no entries; every request will be answered with 404.");
    }

    // --- 4. Initialize the Success Model ---
    let loader = FileModelLoader::new(config.model_path.clone());
    let predictor = match config.model_init {
        ModelInit::Eager => {
            let predictor = ServicePredictor::initialize(loader).await?;
            info!("Success model loaded at startup.");
            predictor
        }
        ModelInit::Lazy => {
            info!("Success model will be loaded on first use.");
            ServicePredictor::deferred(loader)
        }
    };

    let app_state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(predictor),
        Arc::new(curriculum),
    ));

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        model_init = ?config.model_init,
        study_days = ?config.study_days,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}

//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        CurriculumResponse, ErrorResponse, FieldValue, GeneratePathPayload, GeneratePathResponse,
        HealthResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::generate_learning_path,
        handlers::get_curriculum,
        handlers::health,
        handlers::warm_up_model,
    ),
    components(
        schemas(GeneratePathPayload, FieldValue, GeneratePathResponse, CurriculumResponse, HealthResponse, ErrorResponse)
    ),
    tags(
        (name = "Study Path API", description = "Personalised learning-path generation")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/learning-paths", post(handlers::generate_learning_path))
        .route(
            "/curriculum/{subject}/{grade}/{level}",
            get(handlers::get_curriculum),
        )
        .route("/health", get(handlers::health))
        .route("/model/warmup", post(handlers::warm_up_model))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}

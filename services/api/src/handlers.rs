//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for learning-path
//! generation and curriculum lookup. It uses `utoipa` doc comments to generate
//! OpenAPI documentation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use studypath_core::{
    GenerationError, Grade, Level, Subject, predictor::SuccessRatePredictor,
    profile::ProfileValidator,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    models::{
        CurriculumResponse, ErrorResponse, GeneratePathPayload, GeneratePathResponse,
        HealthResponse,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse { message }),
            )
                .into_response(),
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let message = err.to_string();
        match err {
            GenerationError::InvalidInput { .. } => Self::BadRequest(message),
            GenerationError::PredictionUnavailable(_) => Self::ServiceUnavailable(message),
            GenerationError::CurriculumUnavailable { .. } => Self::NotFound(message),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalServerError(err)
    }
}

/// Generate a learning path for a student profile.
#[utoipa::path(
    post,
    path = "/learning-paths",
    request_body = GeneratePathPayload,
    responses(
        (status = 200, description = "Learning path generated", body = GeneratePathResponse),
        (status = 400, description = "Missing or invalid profile field", body = ErrorResponse),
        (status = 404, description = "No curriculum for the resolved level", body = ErrorResponse),
        (status = 503, description = "Success model unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn generate_learning_path(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GeneratePathPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input().map_err(ApiError::BadRequest)?;
    let profile = ProfileValidator::validate_input(&input)?;

    let learning_path = state.builder.generate_learning_path(&profile).await?;
    let path_id = Uuid::new_v4();
    info!(%path_id, level = %learning_path.level, "Learning path served");

    Ok(Json(GeneratePathResponse {
        success: true,
        path_id,
        learning_path,
    }))
}

/// Get the topic breakdown for a subject, grade and level.
#[utoipa::path(
    get,
    path = "/curriculum/{subject}/{grade}/{level}",
    responses(
        (status = 200, description = "Topic breakdown found", body = CurriculumResponse),
        (status = 400, description = "Unknown subject, grade or level", body = ErrorResponse),
        (status = 404, description = "No curriculum for this key", body = ErrorResponse)
    ),
    params(
        ("subject" = String, Path, description = "math, physics or chemistry"),
        ("grade" = String, Path, description = "thcs or thpt"),
        ("level" = String, Path, description = "basic, intermediate, advanced or expert")
    )
)]
pub async fn get_curriculum(
    State(state): State<Arc<AppState>>,
    Path((subject, grade, level)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let subject = subject.parse::<Subject>()?;
    let grade = grade.parse::<Grade>()?;
    let level = level.parse::<Level>()?;

    let breakdown = state
        .builder
        .repository()
        .get_topic_breakdown(subject, grade, level)
        .await?;

    if breakdown.is_empty() {
        warn!(%subject, %grade, %level, "Curriculum lookup found nothing");
        return Err(GenerationError::CurriculumUnavailable {
            subject,
            grade,
            level,
        }
        .into());
    }

    let lesson_count = breakdown.lesson_count();
    Ok(Json(CurriculumResponse {
        breakdown,
        lesson_count,
    }))
}

/// Report liveness and whether the success model has been loaded.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_ready: state.predictor.is_ready(),
        study_days: state.config.study_days,
    })
}

/// Attempt to load the success model without generating a path.
#[utoipa::path(
    post,
    path = "/model/warmup",
    responses(
        (status = 200, description = "Model is loaded", body = HealthResponse),
        (status = 503, description = "Model could not be loaded", body = ErrorResponse)
    )
)]
pub async fn warm_up_model(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .predictor
        .ensure_ready()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        model_ready: true,
        study_days: state.config.study_days,
    }))
}

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;

pub mod authors;
pub mod books;
pub mod external;

use crate::state::AppState;

/// Merges all sub-routers into the main API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .merge(authors::router())
        .merge(books::router())
        .merge(external::router())
}

async fn welcome() -> &'static str {
    "welcome to lib management API!"
}

async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    state.db.health_check().await.map_err(|e| {
        tracing::warn!("Health check failed: {:#}", e);
        ServiceError::Unavailable("database unreachable".to_string())
    })?;

    Ok(Json(json!({ "status": "ok" })))
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::NotFound(e) => (StatusCode::NOT_FOUND, e),
            ServiceError::Unprocessable(e) => (StatusCode::UNPROCESSABLE_ENTITY, e),
            ServiceError::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
            ServiceError::Upstream(e) => (StatusCode::BAD_GATEWAY, e),
            ServiceError::Unavailable(e) => (StatusCode::SERVICE_UNAVAILABLE, e),
            ServiceError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

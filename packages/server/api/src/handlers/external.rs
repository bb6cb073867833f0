use crate::handlers::ServiceError;
use crate::services::catalog::{is_plausible_isbn, CatalogError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new().route("/external-api/books/:isbn", get(book_by_isbn))
}

/// Pass-through lookup in the external catalogue.
pub async fn book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    if !is_plausible_isbn(&isbn) {
        return Err(ServiceError::BadRequest(format!("`{}` is not an ISBN", isbn)));
    }

    match state.catalog.lookup_isbn(&isbn).await {
        Ok(book) => Ok(Json(book)),
        Err(CatalogError::NotFound(_)) => Err(ServiceError::NotFound(format!(
            "Book(isbn: {}) not found !",
            isbn
        ))),
        Err(CatalogError::Transport(e)) => {
            tracing::error!("Catalogue lookup for {} failed: {}", isbn, e);
            Err(ServiceError::Upstream(
                "External book catalogue unavailable".to_string(),
            ))
        }
    }
}

use crate::handlers::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use database::models::Author;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors))
        .route("/authors/:author_id", get(get_author))
}

pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>, ServiceError> {
    let authors = state.db.authors().find_all().await?;
    Ok(Json(authors))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Author>, ServiceError> {
    state
        .db
        .authors()
        .find_by_id(author_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(format!("Author({}) not found !", author_id)))
}

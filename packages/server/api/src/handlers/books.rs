use crate::handlers::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use database::models::{Book, BookChanges, BookFilter, BookWithAuthor, NewBook};
use database::repositories::is_foreign_key_violation;
use shared::dto::{BookFilterQuery, BookNoteResponse, CreateBookPayload, UpdateBookPayload};
use tracing::info;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors/:author_id/books", post(create_book))
        .route("/books", get(list_books))
        .route("/books/:book_id", get(get_book).patch(update_book))
        .route("/books/:book_id/calculateNote", get(book_note))
}

pub async fn create_book(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Json(payload): Json<CreateBookPayload>,
) -> Result<(StatusCode, Json<Book>), ServiceError> {
    info!(%author_id, title = %payload.title, "Creating book");

    let book = NewBook {
        title: payload.title,
        genre: payload.genre,
        publish_date: payload.publish_date.into(),
    };

    match state.db.books().create(author_id, &book).await {
        Ok(book) => Ok((StatusCode::CREATED, Json(book))),
        Err(e) if is_foreign_key_violation(&e) => Err(ServiceError::Unprocessable(format!(
            "Author({}) was not found !",
            author_id
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Json(payload): Json<UpdateBookPayload>,
) -> Result<Json<Book>, ServiceError> {
    let changes = BookChanges {
        title: payload.title,
        genre: payload.genre,
        publish_date: payload.publish_date.map(Into::into),
    };

    state
        .db
        .books()
        .update(book_id, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::Unprocessable(format!("Book({}) not found !", book_id)))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookWithAuthor>, ServiceError> {
    find_book(&state, book_id).await.map(Json)
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookFilterQuery>,
) -> Result<Json<Vec<Book>>, ServiceError> {
    info!(?query, "Listing books");

    let filter = BookFilter {
        author_id: query.author_id,
        genre: query.genre,
        publish_date: query.publish_date.map(Into::into),
    };

    let books = state.db.books().find_all(&filter).await?;
    Ok(Json(books))
}

/// The book must exist before the note is computed; the calculator only
/// sees resolved values.
pub async fn book_note(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookNoteResponse>, ServiceError> {
    let found = find_book(&state, book_id).await?;
    let note = state
        .notes
        .note_for_book(found.book.publish_date, found.author.note);

    Ok(Json(BookNoteResponse { note }))
}

async fn find_book(state: &AppState, book_id: Uuid) -> Result<BookWithAuthor, ServiceError> {
    state
        .db
        .books()
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Book({}) not found !", book_id)))
}

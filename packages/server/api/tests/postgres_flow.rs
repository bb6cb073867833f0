//! End-to-end flow against a real Postgres.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p library-api -- --ignored`.

use chrono::{Months, Utc};
use database::models::Author;
use database::Database;
use library_api::services::catalog::{BookCatalog, CatalogError};
use library_api::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};
use shared::{FixedClock, NoteCalculator};
use std::sync::Arc;
use uuid::Uuid;

struct NoCatalog;

#[async_trait::async_trait]
impl BookCatalog for NoCatalog {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Value, CatalogError> {
        Err(CatalogError::NotFound(isbn.to_string()))
    }
}

async fn setup() -> (String, Arc<Database>) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&url).await.unwrap();
    db.migrate().await.unwrap();

    let state = AppState {
        db: db.clone(),
        notes: NoteCalculator::with_clock(FixedClock(Utc::now())),
        catalog: Arc::new(NoCatalog),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, library_api::router(state)).await.unwrap();
    });

    (format!("http://{}", addr), db)
}

async fn insert_author(db: &Database, name: &str, note: i32) -> Author {
    sqlx::query_as::<_, Author>("INSERT INTO authors (name, note) VALUES ($1, $2) RETURNING *")
        .bind(name)
        .bind(note)
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_lifecycle_and_note() {
    let (base, db) = setup().await;
    let client = reqwest::Client::new();
    let author = insert_author(&db, "Robert C. Martin", 9).await;

    let one_year_ago = Utc::now().checked_sub_months(Months::new(12)).unwrap();
    let response = client
        .post(format!("{}/authors/{}/books", base, author.id))
        .json(&json!({
            "title": "Clean Code",
            "genre": "IT",
            "publishDate": one_year_ago.to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let book_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["authorId"], author.id.to_string());

    let book: Value = client
        .get(format!("{}/books/{}", base, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["title"], "Clean Code");
    assert_eq!(book["author"]["note"], 9);

    // freshness 9, reputation 9
    let note: Value = client
        .get(format!("{}/books/{}/calculateNote", base, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(note, json!({ "note": 9 }));

    let updated: Value = client
        .patch(format!("{}/books/{}", base, book_id))
        .json(&json!({ "title": "Clean Code (2nd edition)", "publishDate": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["title"], "Clean Code (2nd edition)");
    assert_eq!(updated["genre"], "IT");
    assert_eq!(updated["publishDate"], created["publishDate"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_records() {
    let (base, _db) = setup().await;
    let client = reqwest::Client::new();
    let missing = Uuid::new_v4();

    let response = client
        .post(format!("{}/authors/{}/books", base, missing))
        .json(&json!({ "title": "Ghost", "genre": "IT", "publishDate": "2020-01-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], format!("Author({}) was not found !", missing));

    let response = client
        .patch(format!("{}/books/{}", base, missing))
        .json(&json!({ "title": "Test2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    for path in ["books", "authors"] {
        let response = client
            .get(format!("{}/{}/{}", base, path, missing))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = client
        .get(format!("{}/books/{}/calculateNote", base, missing))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], format!("Book({}) not found !", missing));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_books_filters_and_orders() {
    let (base, db) = setup().await;
    let client = reqwest::Client::new();
    let author = insert_author(&db, "Kevlin Henney", 7).await;

    for (title, genre, date) in [
        ("Older", "IT", "2010-02-01"),
        ("Newer", "IT", "2019-05-01"),
        ("Essay", "Essays", "2015-01-01"),
    ] {
        let response = client
            .post(format!("{}/authors/{}/books", base, author.id))
            .json(&json!({ "title": title, "genre": genre, "publishDate": date }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let books: Vec<Value> = client
        .get(format!("{}/books?authorId={}&genre=IT", base, author.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = books.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Newer", "Older"]);

    let books: Vec<Value> = client
        .get(format!("{}/books?authorId={}&publishDate=2015-01-01", base, author.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Essay");

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

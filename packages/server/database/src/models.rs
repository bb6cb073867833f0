use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    /// Reputation of the author, expected in 2..=10.
    pub note: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub publish_date: DateTime<Utc>,
    pub author_id: Uuid,
}

/// A book with its author embedded, as returned by `GET /books/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

/// Row shape of the books/authors join.
#[derive(Debug, FromRow)]
pub(crate) struct BookAuthorRow {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub publish_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_note: i32,
}

impl From<BookAuthorRow> for BookWithAuthor {
    fn from(row: BookAuthorRow) -> Self {
        Self {
            book: Book {
                id: row.id,
                title: row.title,
                genre: row.genre,
                publish_date: row.publish_date,
                author_id: row.author_id,
            },
            author: Author {
                id: row.author_id,
                name: row.author_name,
                note: row.author_note,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub genre: String,
    pub publish_date: DateTime<Utc>,
}

/// Partial update of a book. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BookChanges {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

/// Equality filters for listing books. `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub author_id: Option<Uuid>,
    pub genre: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

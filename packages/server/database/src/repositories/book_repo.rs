use crate::models::{Book, BookAuthorRow, BookChanges, BookFilter, BookWithAuthor, NewBook};
use sqlx::{PgPool, Result};
use uuid::Uuid;

pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fails with a foreign key violation when the author does not exist.
    pub async fn create(&self, author_id: Uuid, book: &NewBook) -> Result<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, genre, publish_date, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.genre)
        .bind(book.publish_date)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Returns `None` when no book has this id.
    pub async fn update(&self, id: Uuid, changes: &BookChanges) -> Result<Option<Book>> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                genre = COALESCE($3, genre),
                publish_date = COALESCE($4, publish_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.genre.as_deref())
        .bind(changes.publish_date)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BookWithAuthor>> {
        let row = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.genre,
                b.publish_date,
                b.author_id,
                a.name AS author_name,
                a.note AS author_note
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookWithAuthor::from))
    }

    /// Newest first.
    pub async fn find_all(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ($1::uuid IS NULL OR author_id = $1)
              AND ($2::text IS NULL OR genre = $2)
              AND ($3::timestamptz IS NULL OR publish_date = $3)
            ORDER BY publish_date DESC
            "#,
        )
        .bind(filter.author_id)
        .bind(filter.genre.as_deref())
        .bind(filter.publish_date)
        .fetch_all(&self.pool)
        .await
    }
}

pub mod author_repo;
pub mod book_repo;

pub use author_repo::AuthorRepository;
pub use book_repo::BookRepository;

/// True when the statement was rejected because a referenced row is missing.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

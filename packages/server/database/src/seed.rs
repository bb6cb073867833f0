use crate::models::{Author, Book};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;

struct SeedBook {
    title: &'static str,
    genre: &'static str,
    publish_date: (i32, u32, u32),
}

struct SeedAuthor {
    name: &'static str,
    note: i32,
    books: &'static [SeedBook],
}

const CATALOGUE: &[SeedAuthor] = &[
    SeedAuthor {
        name: "Kevlin Henney",
        note: 7,
        books: &[SeedBook {
            title: "97 Things Every Programmer Should Know",
            genre: "IT",
            publish_date: (2010, 2, 1),
        }],
    },
    SeedAuthor {
        name: "Robert C. Martin",
        note: 7,
        books: &[
            SeedBook {
                title: "Clean Code",
                genre: "IT",
                publish_date: (2008, 7, 1),
            },
            SeedBook {
                title: "Clean Architecture",
                genre: "IT",
                publish_date: (2017, 9, 10),
            },
        ],
    },
    SeedAuthor {
        name: "Eric Evans",
        note: 8,
        books: &[SeedBook {
            title: "Domain-driven design",
            genre: "IT",
            publish_date: (2003, 8, 20),
        }],
    },
];

fn midnight_utc((year, month, day): (i32, u32, u32)) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .with_context(|| format!("invalid seed date {}-{}-{}", year, month, day))
}

/// Inserts the demo authors and their books in a single transaction.
/// Returns the number of books inserted.
pub async fn seed_demo_catalogue(pool: &PgPool) -> Result<usize> {
    let mut tx = pool.begin().await.context("Failed to open transaction")?;
    let mut inserted = 0;

    for entry in CATALOGUE {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, note) VALUES ($1, $2) RETURNING *",
        )
        .bind(entry.name)
        .bind(entry.note)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert author {}", entry.name))?;
        info!(author_id = %author.id, name = %author.name, note = author.note, "Author added");

        for seed in entry.books {
            let book = sqlx::query_as::<_, Book>(
                r#"
                INSERT INTO books (title, genre, publish_date, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(seed.title)
            .bind(seed.genre)
            .bind(midnight_utc(seed.publish_date)?)
            .bind(author.id)
            .fetch_one(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert book {}", seed.title))?;
            info!(book_id = %book.id, title = %book.title, "Book added");
            inserted += 1;
        }
        info!("Books ({}) for {} were added", entry.books.len(), author.name);
    }

    tx.commit().await.context("Failed to commit seed")?;
    Ok(inserted)
}

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalogue entry for ISBN {0}")]
    NotFound(String),
    #[error("catalogue request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An external book catalogue, queried by ISBN.
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Value, CatalogError>;
}

/// Open Library's `/api/books` endpoint.
pub struct OpenLibraryCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryCatalog {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build catalogue HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl BookCatalog for OpenLibraryCatalog {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Value, CatalogError> {
        let bibkey = format!("ISBN:{}", isbn);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("bibkeys", bibkey.as_str()), ("format", "json")])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::debug!(isbn, status = %response.status(), "Catalogue answered without a book");
            return Err(CatalogError::NotFound(isbn.to_string()));
        }

        let body: Value = response.json().await?;
        if is_blank(&body) {
            return Err(CatalogError::NotFound(isbn.to_string()));
        }

        Ok(body)
    }
}

/// Open Library answers `{}` for unknown ISBNs.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// ISBN-10/13, optionally hyphenated. `X` is only allowed as the check
/// digit of an ISBN-10.
pub fn is_plausible_isbn(isbn: &str) -> bool {
    let chars: Vec<char> = isbn.chars().filter(|c| *c != '-').collect();
    match chars.as_slice() {
        [body @ .., check] if chars.len() == 10 => {
            body.iter().all(char::is_ascii_digit)
                && (check.is_ascii_digit() || *check == 'X' || *check == 'x')
        }
        digits if digits.len() == 13 => digits.iter().all(char::is_ascii_digit),
        _ => false,
    }
}

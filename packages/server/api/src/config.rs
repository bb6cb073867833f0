use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;

const DEFAULT_EXTERNAL_BOOK_API_URL: &str = "https://openlibrary.org/api/books";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3001";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub external_book_api_url: String,
    pub bind_addr: SocketAddr,
    pub cors_allowed_origin: HeaderValue,
}

impl Config {
    /// Reads the configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let external_book_api_url = lookup("EXTERNAL_BOOK_API_URL")
            .unwrap_or_else(|| DEFAULT_EXTERNAL_BOOK_API_URL.to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR `{}` is not a socket address", bind_addr))?;

        let origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string());
        let cors_allowed_origin = origin
            .parse()
            .with_context(|| format!("CORS_ALLOWED_ORIGIN `{}` is not a valid header", origin))?;

        Ok(Self {
            database_url,
            external_book_api_url,
            bind_addr,
            cors_allowed_origin,
        })
    }
}

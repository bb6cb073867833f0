use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod handlers;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;

/// Builds the application router with request tracing.
pub fn router(state: AppState) -> Router {
    handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

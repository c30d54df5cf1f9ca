//! Axum router construction.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;

/// Build the application [`Router`]: one catch-all handler plus request tracing.
pub fn build() -> Router {
    Router::new()
        .fallback(handlers::hello)
        .layer(TraceLayer::new_for_http())
}

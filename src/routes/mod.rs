//! HTTP route table.
//!
//! The service exposes a single route, `GET /`. Every other path goes to an
//! explicit not-found handler; other methods on `/` get axum's built-in
//! `405 Method Not Allowed`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request.

pub mod fallback;
pub mod greeting;

use axum::{middleware, routing::get, Router};

use crate::config::ROOT_PATH;
use crate::middleware::request_id_layer;

/// Creates the Axum router with the greeting route and the not-found fallback.
pub fn create_router() -> Router {
    Router::new()
        .route(ROOT_PATH, get(greeting::index))
        .fallback(fallback::not_found)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

//! Greeting endpoint.

use axum::response::Html;

use crate::config::GREETING;

/// Handler for `GET /`.
///
/// The body is constant for the life of the process and carries the
/// `text/html; charset=utf-8` content type.
pub async fn index() -> Html<&'static str> {
    Html(GREETING)
}

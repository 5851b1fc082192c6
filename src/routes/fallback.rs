//! Default handler for requests that match no route.

use http::StatusCode;

use crate::config::NOT_FOUND_BODY;

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

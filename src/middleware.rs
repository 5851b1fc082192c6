//! Request logging middleware.
//!
//! Generates a UUID v4 for each incoming request and opens a tracing span for
//! it. When the handler finishes, one completion line is emitted with the
//! logfmt request-logger fields: `ip`, `method`, `path`, `status`,
//! `content_length`, `content_type`, `elapsed`.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID stored in request extensions.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware that tags the request with an ID and logs its completion.
///
/// Must be the outermost layer so the span also covers the fallback handler.
/// `ip` is only recorded when the router is served with connect info.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.ip());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        ip = tracing::field::Empty,
        method = %request.method(),
        path = %request.uri().path(),
    );
    if let Some(ip) = ip {
        span.record("ip", tracing::field::display(ip));
    }

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let (content_length, content_type) = content_fields(&response);

        tracing::info!(
            status = response.status().as_u16(),
            content_length,
            content_type,
            elapsed = %format_args!("{}ms", start.elapsed().as_millis()),
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// `Content-Length` and `Content-Type` of a response, when present and
/// readable.
fn content_fields(response: &Response) -> (Option<u64>, Option<&str>) {
    let headers = response.headers();
    let length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    (length, content_type)
}

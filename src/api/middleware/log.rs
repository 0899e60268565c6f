//! Request logging middleware.
//!
//! Logs every request with method, path and response status. Internal
//! error detail never appears here; it is logged where the error is
//! raised.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log one line per request.
pub async fn log_request(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}

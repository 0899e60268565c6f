//! Write-access guard.
//!
//! Every mutating method (POST/PUT/DELETE) must carry
//! `Authorization: Bearer <token>` matching the configured admin
//! token. Read methods pass through untouched.

use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Require the admin bearer token for mutating methods.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer).
pub async fn require_write_access(req: Request<axum::body::Body>, next: Next) -> Response {
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(req).await;
    }

    let Some(ctx) = req.extensions().get::<ApiContext>().cloned() else {
        return ApiError::Internal("missing API context".into()).into_response();
    };

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if !ctx.authorize_write(token) {
        return ApiError::Unauthorized.into_response();
    }

    next.run(req).await
}

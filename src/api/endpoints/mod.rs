//! API endpoint handlers, one module per entity collection.
//!
//! Every create handler runs the same pipeline: check each required
//! field is present and non-empty (structural check only — no format
//! validation beyond what the store enforces), perform exactly one
//! store operation, map the outcome to a status code.

use serde::Serialize;

use crate::api::error::ApiError;

pub mod appointments;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod payments;
pub mod products;
pub mod services;

/// Shared delete confirmation body.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    fn for_entity(noun: &str) -> Self {
        Self {
            message: format!("{noun} deleted successfully"),
        }
    }
}

/// Reject the request with a message naming the field when it is
/// absent or empty.
pub(crate) fn require(field: &'static str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("{field} is required"))),
    }
}

pub(crate) fn require_f64(field: &'static str, value: Option<f64>) -> Result<f64, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

pub(crate) fn require_i64(field: &'static str, value: Option<i64>) -> Result<i64, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

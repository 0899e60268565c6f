//! Payment endpoints.
//!
//! Checkout accepts full card details, tokenizes them in memory and
//! persists only the processor token and last four digits. Payments
//! are read-only after creation, so there is no update or delete
//! route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::require;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewPayment, Payment};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub payment_method: Option<String>,
    pub name: Option<String>,
    pub card_number: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub security_code: Option<String>,
}

#[derive(Serialize)]
pub struct CreatePaymentResponse {
    pub message: &'static str,
    pub payment: Payment,
}

/// `POST /api/payments` — record a checkout payment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<CreatePaymentResponse>), ApiError> {
    let new = NewPayment {
        payment_method: require("paymentMethod", req.payment_method)?,
        name: require("name", req.name)?,
        card_number: require("cardNumber", req.card_number)?,
        expiry_month: require("expiryMonth", req.expiry_month)?,
        expiry_year: require("expiryYear", req.expiry_year)?,
    };
    // Presence-checked, then discarded: the security code is never
    // stored or forwarded.
    require("securityCode", req.security_code)?;

    let conn = ctx.conn()?;
    let payment = Payment::new(new);
    repository::insert(&conn, &payment)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePaymentResponse {
            message: "Payment information saved successfully",
            payment,
        }),
    ))
}

/// `GET /api/payments` — all payments.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Payment>>, ApiError> {
    let conn = ctx.conn()?;
    let payments = repository::list::<Payment>(&conn)?;
    Ok(Json(payments))
}

/// `GET /api/payments/:id` — fetch one payment.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let conn = ctx.conn()?;
    let payment = repository::get_by::<Payment>(&conn, "id", &id)?;
    Ok(Json(payment))
}

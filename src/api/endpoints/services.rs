//! Service endpoints. Admin-managed; read by the booking flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::{require, require_f64, DeletedResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewService, Service, ServiceChanges};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct CreateServiceResponse {
    pub service: Service,
}

/// `POST /api/services` — create a service.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<CreateServiceResponse>), ApiError> {
    let new = NewService {
        title: require("title", req.title)?,
        name: require("name", req.name)?,
        description: require("description", req.description)?,
        price: require_f64("price", req.price)?,
        image: req.image,
    };

    let conn = ctx.conn()?;
    let service = Service::new(new);
    repository::insert(&conn, &service)?;

    Ok((StatusCode::CREATED, Json(CreateServiceResponse { service })))
}

/// `GET /api/services` — all services.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Service>>, ApiError> {
    let conn = ctx.conn()?;
    let services = repository::list::<Service>(&conn)?;
    Ok(Json(services))
}

/// `GET /api/services/:id` — fetch one service.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let conn = ctx.conn()?;
    let service = repository::get_by::<Service>(&conn, "id", &id)?;
    Ok(Json(service))
}

/// `PUT /api/services/:id` — merge supplied fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(changes): Json<ServiceChanges>,
) -> Result<Json<Service>, ApiError> {
    let conn = ctx.conn()?;
    let service = repository::update_by::<Service>(&conn, "id", &id, changes.into_changes())?;
    Ok(Json(service))
}

/// `DELETE /api/services/:id` — remove a service.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let conn = ctx.conn()?;
    repository::delete_by::<Service>(&conn, "id", &id)?;
    Ok(Json(DeletedResponse::for_entity("Service")))
}

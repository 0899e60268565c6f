//! Product endpoints — legacy catalogue CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::{require, require_f64, DeletedResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewProduct, Product, ProductChanges};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct CreateProductResponse {
    pub product: Product,
}

/// `POST /api/products` — create a product.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResponse>), ApiError> {
    let new = NewProduct {
        name: require("name", req.name)?,
        price: require_f64("price", req.price)?,
        description: require("description", req.description)?,
    };

    let conn = ctx.conn()?;
    let product = Product::new(new);
    repository::insert(&conn, &product)?;

    Ok((StatusCode::CREATED, Json(CreateProductResponse { product })))
}

/// `GET /api/products` — all products.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Product>>, ApiError> {
    let conn = ctx.conn()?;
    let products = repository::list::<Product>(&conn)?;
    Ok(Json(products))
}

/// `GET /api/products/:id` — fetch one product.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let conn = ctx.conn()?;
    let product = repository::get_by::<Product>(&conn, "id", &id)?;
    Ok(Json(product))
}

/// `PUT /api/products/:id` — merge supplied fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(changes): Json<ProductChanges>,
) -> Result<Json<Product>, ApiError> {
    let conn = ctx.conn()?;
    let product = repository::update_by::<Product>(&conn, "id", &id, changes.into_changes())?;
    Ok(Json(product))
}

/// `DELETE /api/products/:id` — remove a product.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let conn = ctx.conn()?;
    repository::delete_by::<Product>(&conn, "id", &id)?;
    Ok(Json(DeletedResponse::for_entity("Product")))
}

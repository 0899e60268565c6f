//! Doctor endpoints. Admin-managed CRUD; email is unique.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::{require, require_i64, DeletedResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Doctor, DoctorChanges, NewDoctor};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub years_of_experience: Option<i64>,
    pub qualifications: Option<String>,
    pub clinic_address: Option<String>,
    pub availability: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
}

#[derive(Serialize)]
pub struct CreateDoctorResponse {
    pub doctor: Doctor,
}

/// `POST /api/doctors` — create a doctor profile.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<CreateDoctorResponse>), ApiError> {
    let new = NewDoctor {
        first_name: require("firstName", req.first_name)?,
        last_name: require("lastName", req.last_name)?,
        email: require("email", req.email)?,
        phone: require("phone", req.phone)?,
        specialization: require("specialization", req.specialization)?,
        years_of_experience: require_i64("yearsOfExperience", req.years_of_experience)?,
        qualifications: require("qualifications", req.qualifications)?,
        clinic_address: require("clinicAddress", req.clinic_address)?,
        availability: require("availability", req.availability)?,
        gender: require("gender", req.gender)?,
        bio: req.bio,
    };

    let conn = ctx.conn()?;
    let doctor = Doctor::new(new);
    repository::insert(&conn, &doctor).map_err(|e| {
        if e.is_unique_violation("doctors.email") {
            ApiError::BadRequest("A doctor with this email already exists".into())
        } else {
            e.into()
        }
    })?;

    Ok((StatusCode::CREATED, Json(CreateDoctorResponse { doctor })))
}

/// `GET /api/doctors` — all doctors.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.conn()?;
    let doctors = repository::list::<Doctor>(&conn)?;
    Ok(Json(doctors))
}

/// `GET /api/doctors/:id` — fetch one doctor.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let conn = ctx.conn()?;
    let doctor = repository::get_by::<Doctor>(&conn, "id", &id)?;
    Ok(Json(doctor))
}

/// `PUT /api/doctors/:id` — merge supplied fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(changes): Json<DoctorChanges>,
) -> Result<Json<Doctor>, ApiError> {
    let conn = ctx.conn()?;
    let doctor = repository::update_by::<Doctor>(&conn, "id", &id, changes.into_changes())
        .map_err(|e| {
            if e.is_unique_violation("doctors.email") {
                ApiError::BadRequest("A doctor with this email already exists".into())
            } else {
                e.into()
            }
        })?;
    Ok(Json(doctor))
}

/// `DELETE /api/doctors/:id` — remove a doctor profile.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let conn = ctx.conn()?;
    repository::delete_by::<Doctor>(&conn, "id", &id)?;
    Ok(Json(DeletedResponse::for_entity("Doctor")))
}

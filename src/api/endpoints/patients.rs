//! Patient endpoints.
//!
//! Registration allocates the 16-digit `U_id` and returns both the
//! stored record and a `qrData` string — the serialized patient JSON
//! the client encodes into the health-card QR code. The scanning
//! consumer decodes that payload and re-fetches the canonical record
//! by business id, so the single-record routes are keyed by `U_id`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::allocator;
use crate::api::endpoints::{require, DeletedResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewPatient, Patient, PatientChanges};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub insurance_number: Option<String>,
    pub physician: Option<String>,
    pub medical_history: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Serialize)]
pub struct CreatePatientResponse {
    pub patient: Patient,
    #[serde(rename = "qrData")]
    pub qr_data: String,
}

/// `POST /api/patients` — register a patient and return QR code data.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<CreatePatientResponse>), ApiError> {
    let new = NewPatient {
        first_name: require("firstName", req.first_name)?,
        last_name: require("lastName", req.last_name)?,
        dob: require("dob", req.dob)?,
        gender: require("gender", req.gender)?,
        email: require("email", req.email)?,
        phone: require("phone", req.phone)?,
        address: require("address", req.address)?,
        insurance_number: require("insuranceNumber", req.insurance_number)?,
        physician: require("physician", req.physician)?,
        medical_history: require("medicalHistory", req.medical_history)?,
        blood_type: require("bloodType", req.blood_type)?,
        emergency_contact: require("emergencyContact", req.emergency_contact)?,
    };

    let conn = ctx.conn()?;
    let patient = allocator::insert_unique(&conn, "patients.u_id", || {
        Patient::new(allocator::patient_uid(), new.clone())
    })?;

    let qr_data =
        serde_json::to_string(&patient).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePatientResponse { patient, qr_data }),
    ))
}

/// `GET /api/patients` — all patients.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.conn()?;
    let patients = repository::list::<Patient>(&conn)?;
    Ok(Json(patients))
}

/// `GET /api/patients/:uid` — fetch one patient by business id.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(uid): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let conn = ctx.conn()?;
    let patient = repository::get_by::<Patient>(&conn, "u_id", &uid)?;
    Ok(Json(patient))
}

/// `PUT /api/patients/:uid` — merge supplied fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(uid): Path<String>,
    Json(changes): Json<PatientChanges>,
) -> Result<Json<Patient>, ApiError> {
    let conn = ctx.conn()?;
    let patient = repository::update_by::<Patient>(&conn, "u_id", &uid, changes.into_changes())?;
    Ok(Json(patient))
}

/// `DELETE /api/patients/:uid` — remove a patient record.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(uid): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let conn = ctx.conn()?;
    repository::delete_by::<Patient>(&conn, "u_id", &uid)?;
    Ok(Json(DeletedResponse::for_entity("Patient")))
}

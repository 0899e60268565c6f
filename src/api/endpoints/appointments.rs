//! Appointment endpoints.
//!
//! Booking allocates the 4-character appointment code. The patient
//! reference is an explicit required input — there is no fallback
//! patient, and neither reference is checked against the patient or
//! doctor collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::allocator;
use crate::api::endpoints::{require, DeletedResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Appointment, AppointmentChanges, NewAppointment};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
    pub time: Option<String>,
    pub appointment_reason: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct CreateAppointmentResponse {
    pub appointment: Appointment,
}

/// `POST /api/appointments` — book an appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), ApiError> {
    let new = NewAppointment {
        patient_id: require("patientId", req.patient_id)?,
        doctor_id: require("doctorId", req.doctor_id)?,
        appointment_date: require("appointmentDate", req.appointment_date)?,
        time: require("time", req.time)?,
        appointment_reason: require("appointmentReason", req.appointment_reason)?,
        location: require("location", req.location)?,
        notes: req.notes,
    };

    let conn = ctx.conn()?;
    let appointment = allocator::insert_unique(&conn, "appointments.appointment_id", || {
        Appointment::new(allocator::appointment_code(), new.clone())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse { appointment }),
    ))
}

/// `GET /api/appointments` — all appointments.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Appointment>>, ApiError> {
    let conn = ctx.conn()?;
    let appointments = repository::list::<Appointment>(&conn)?;
    Ok(Json(appointments))
}

/// `GET /api/appointments/:id` — fetch one appointment.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.conn()?;
    let appointment = repository::get_by::<Appointment>(&conn, "id", &id)?;
    Ok(Json(appointment))
}

/// `PUT /api/appointments/:id` — merge supplied fields; status values
/// are validated at the store boundary.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(changes): Json<AppointmentChanges>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.conn()?;
    let changes = changes.into_changes()?;
    let appointment = repository::update_by::<Appointment>(&conn, "id", &id, changes)?;
    Ok(Json(appointment))
}

/// `DELETE /api/appointments/:id` — cancel-and-remove an appointment.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let conn = ctx.conn()?;
    repository::delete_by::<Appointment>(&conn, "id", &id)?;
    Ok(Json(DeletedResponse::for_entity("Appointment")))
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{ChangeSet, Entity};
use crate::models::enums::{AppointmentStatus, PaymentStatus};
use crate::models::parse_timestamp;

/// A booked appointment. `appointment_id` is the 4-character code
/// handed to the patient; `patient_id`/`doctor_id` are free-form
/// references with no referential-integrity enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
    pub time: String,
    pub appointment_status: AppointmentStatus,
    pub appointment_reason: String,
    pub location: String,
    pub notes: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated booking input. The patient reference is an explicit
/// required input; there is no fallback value.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
    pub time: String,
    pub appointment_reason: String,
    pub location: String,
    pub notes: Option<String>,
}

impl Appointment {
    /// New booking with default Scheduled / Pending statuses.
    pub fn new(appointment_id: String, new: NewAppointment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            appointment_id,
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            appointment_date: new.appointment_date,
            time: new.time,
            appointment_status: AppointmentStatus::Scheduled,
            appointment_reason: new.appointment_reason,
            location: new.location,
            notes: new.notes,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Appointment {
    const TABLE: &'static str = "appointments";
    const NOUN: &'static str = "Appointment";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "appointment_id",
        "patient_id",
        "doctor_id",
        "appointment_date",
        "time",
        "appointment_status",
        "appointment_reason",
        "location",
        "notes",
        "payment_status",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let status_str: String = row.get(6)?;
        let payment_str: String = row.get(10)?;
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            appointment_id: row.get(1)?,
            patient_id: row.get(2)?,
            doctor_id: row.get(3)?,
            appointment_date: row.get(4)?,
            time: row.get(5)?,
            appointment_status: AppointmentStatus::from_str(&status_str).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            appointment_reason: row.get(7)?,
            location: row.get(8)?,
            notes: row.get(9)?,
            payment_status: PaymentStatus::from_str(&payment_str).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    10,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            created_at: parse_timestamp(&row.get::<_, String>(11)?),
            updated_at: parse_timestamp(&row.get::<_, String>(12)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.appointment_id.clone()),
            Value::from(self.patient_id.clone()),
            Value::from(self.doctor_id.clone()),
            Value::from(self.appointment_date.clone()),
            Value::from(self.time.clone()),
            Value::from(self.appointment_status.as_str().to_string()),
            Value::from(self.appointment_reason.clone()),
            Value::from(self.location.clone()),
            self.notes.clone().map(Value::from).unwrap_or(Value::Null),
            Value::from(self.payment_status.as_str().to_string()),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

/// Partial update for status changes and admin edits. Status fields
/// arrive as strings and are parsed here, at the store boundary, so an
/// undeclared value is rejected before any write.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
    pub time: Option<String>,
    pub appointment_status: Option<String>,
    pub appointment_reason: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub payment_status: Option<String>,
}

impl AppointmentChanges {
    pub fn into_changes(self) -> Result<ChangeSet, crate::db::DatabaseError> {
        let mut changes = ChangeSet::new();
        let mut push = |column: &'static str, v: Option<String>| {
            if let Some(v) = v {
                changes.push((column, Value::from(v)));
            }
        };
        push("patient_id", self.patient_id);
        push("doctor_id", self.doctor_id);
        push("appointment_date", self.appointment_date);
        push("time", self.time);
        push("appointment_reason", self.appointment_reason);
        push("location", self.location);
        push("notes", self.notes);
        if let Some(status) = self.appointment_status {
            let parsed = AppointmentStatus::from_str(&status)?;
            changes.push(("appointment_status", Value::from(parsed.as_str().to_string())));
        }
        if let Some(status) = self.payment_status {
            let parsed = PaymentStatus::from_str(&status)?;
            changes.push(("payment_status", Value::from(parsed.as_str().to_string())));
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseError;

    pub(crate) fn sample() -> NewAppointment {
        NewAppointment {
            patient_id: "1234567890123456".into(),
            doctor_id: "doc-1".into(),
            appointment_date: "2026-09-15".into(),
            time: "10:30".into(),
            appointment_reason: "Chest pain follow-up".into(),
            location: "Clinic A".into(),
            notes: None,
        }
    }

    #[test]
    fn new_defaults_to_scheduled_and_pending() {
        let appt = Appointment::new("Ab3X".into(), sample());
        assert_eq!(appt.appointment_status, AppointmentStatus::Scheduled);
        assert_eq!(appt.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn changes_parse_valid_statuses() {
        let changes = AppointmentChanges {
            appointment_status: Some("Completed".into()),
            payment_status: Some("Paid".into()),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn changes_reject_undeclared_status() {
        let err = AppointmentChanges {
            appointment_status: Some("Rescheduled".into()),
            ..Default::default()
        }
        .into_changes()
        .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn serializes_camel_case_wire_fields() {
        let appt = Appointment::new("Ab3X".into(), sample());
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["appointmentId"], "Ab3X");
        assert_eq!(json["appointmentStatus"], "Scheduled");
        assert_eq!(json["paymentStatus"], "Pending");
        assert_eq!(json["appointmentReason"], "Chest pain follow-up");
    }
}

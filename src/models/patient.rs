use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{ChangeSet, Entity};
use crate::models::parse_timestamp;

/// A registered patient. `u_id` is the 16-digit business identifier
/// carried in the health-card QR code; `id` is the store identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    #[serde(rename = "U_id")]
    pub u_id: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub insurance_number: String,
    pub physician: String,
    pub medical_history: String,
    pub blood_type: String,
    pub emergency_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration input, before an identifier is allocated.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub insurance_number: String,
    pub physician: String,
    pub medical_history: String,
    pub blood_type: String,
    pub emergency_contact: String,
}

impl Patient {
    pub fn new(u_id: String, new: NewPatient) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            u_id,
            first_name: new.first_name,
            last_name: new.last_name,
            dob: new.dob,
            gender: new.gender,
            email: new.email,
            phone: new.phone,
            address: new.address,
            insurance_number: new.insurance_number,
            physician: new.physician,
            medical_history: new.medical_history,
            blood_type: new.blood_type,
            emergency_contact: new.emergency_contact,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Patient {
    const TABLE: &'static str = "patients";
    const NOUN: &'static str = "Patient";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "u_id",
        "first_name",
        "last_name",
        "dob",
        "gender",
        "email",
        "phone",
        "address",
        "insurance_number",
        "physician",
        "medical_history",
        "blood_type",
        "emergency_contact",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            u_id: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            dob: row.get(4)?,
            gender: row.get(5)?,
            email: row.get(6)?,
            phone: row.get(7)?,
            address: row.get(8)?,
            insurance_number: row.get(9)?,
            physician: row.get(10)?,
            medical_history: row.get(11)?,
            blood_type: row.get(12)?,
            emergency_contact: row.get(13)?,
            created_at: parse_timestamp(&row.get::<_, String>(14)?),
            updated_at: parse_timestamp(&row.get::<_, String>(15)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.u_id.clone()),
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
            Value::from(self.dob.clone()),
            Value::from(self.gender.clone()),
            Value::from(self.email.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.address.clone()),
            Value::from(self.insurance_number.clone()),
            Value::from(self.physician.clone()),
            Value::from(self.medical_history.clone()),
            Value::from(self.blood_type.clone()),
            Value::from(self.emergency_contact.clone()),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

/// Partial update for admin edits. Only supplied fields are merged;
/// the business identifier is never editable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientChanges {
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

impl PatientChanges {
    pub fn into_changes(self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        let mut push = |column: &'static str, v: Option<String>| {
            if let Some(v) = v {
                changes.push((column, Value::from(v)));
            }
        };
        push("first_name", self.first_name);
        push("last_name", self.last_name);
        push("dob", self.dob);
        push("gender", self.gender);
        push("email", self.email);
        push("phone", self.phone);
        push("address", self.address);
        push("insurance_number", self.insurance_number);
        push("physician", self.physician);
        push("medical_history", self.medical_history);
        push("blood_type", self.blood_type);
        push("emergency_contact", self.emergency_contact);
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPatient {
        NewPatient {
            first_name: "Amara".into(),
            last_name: "Perera".into(),
            dob: "1990-05-01".into(),
            gender: "Female".into(),
            email: "amara@example.com".into(),
            phone: "0771234567".into(),
            address: "12 Lake Rd".into(),
            insurance_number: "INS-778".into(),
            physician: "Dr. Silva".into(),
            medical_history: "None".into(),
            blood_type: "O+".into(),
            emergency_contact: "0779876543".into(),
        }
    }

    #[test]
    fn new_assigns_id_and_timestamps() {
        let patient = Patient::new("1234567890123456".into(), sample());
        assert!(!patient.id.is_nil());
        assert_eq!(patient.u_id, "1234567890123456");
        assert_eq!(patient.created_at, patient.updated_at);
    }

    #[test]
    fn serializes_business_key_as_u_id() {
        let patient = Patient::new("1234567890123456".into(), sample());
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["U_id"], "1234567890123456");
        assert_eq!(json["firstName"], "Amara");
        assert!(json.get("u_id").is_none());
    }

    #[test]
    fn changes_skip_unsupplied_fields() {
        let changes = PatientChanges {
            phone: Some("0700000000".into()),
            ..Default::default()
        }
        .into_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, "phone");
    }
}

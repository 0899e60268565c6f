use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{ChangeSet, Entity};
use crate::models::parse_timestamp;

/// A doctor profile managed by admin. Email is unique across doctors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub years_of_experience: i64,
    pub qualifications: String,
    pub clinic_address: String,
    pub availability: String,
    pub gender: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub years_of_experience: i64,
    pub qualifications: String,
    pub clinic_address: String,
    pub availability: String,
    pub gender: String,
    pub bio: Option<String>,
}

impl Doctor {
    pub fn new(new: NewDoctor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            specialization: new.specialization,
            years_of_experience: new.years_of_experience,
            qualifications: new.qualifications,
            clinic_address: new.clinic_address,
            availability: new.availability,
            gender: new.gender,
            bio: new.bio,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Doctor {
    const TABLE: &'static str = "doctors";
    const NOUN: &'static str = "Doctor";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "specialization",
        "years_of_experience",
        "qualifications",
        "clinic_address",
        "availability",
        "gender",
        "bio",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            specialization: row.get(5)?,
            years_of_experience: row.get(6)?,
            qualifications: row.get(7)?,
            clinic_address: row.get(8)?,
            availability: row.get(9)?,
            gender: row.get(10)?,
            bio: row.get(11)?,
            created_at: parse_timestamp(&row.get::<_, String>(12)?),
            updated_at: parse_timestamp(&row.get::<_, String>(13)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
            Value::from(self.email.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.specialization.clone()),
            Value::from(self.years_of_experience),
            Value::from(self.qualifications.clone()),
            Value::from(self.clinic_address.clone()),
            Value::from(self.availability.clone()),
            Value::from(self.gender.clone()),
            self.bio.clone().map(Value::from).unwrap_or(Value::Null),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorChanges {
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

impl DoctorChanges {
    pub fn into_changes(self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        let mut push = |column: &'static str, v: Option<String>| {
            if let Some(v) = v {
                changes.push((column, Value::from(v)));
            }
        };
        push("first_name", self.first_name);
        push("last_name", self.last_name);
        push("email", self.email);
        push("phone", self.phone);
        push("specialization", self.specialization);
        push("qualifications", self.qualifications);
        push("clinic_address", self.clinic_address);
        push("availability", self.availability);
        push("gender", self.gender);
        push("bio", self.bio);
        if let Some(years) = self.years_of_experience {
            changes.push(("years_of_experience", Value::from(years)));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_memory_database, repository};

    pub(crate) fn sample() -> NewDoctor {
        NewDoctor {
            first_name: "Nadia".into(),
            last_name: "Fernando".into(),
            email: "nadia@clinic.example".into(),
            phone: "0112345678".into(),
            specialization: "Cardiology".into(),
            years_of_experience: 12,
            qualifications: "MBBS, MD".into(),
            clinic_address: "45 Hospital Rd".into(),
            availability: "Mon-Fri 9-17".into(),
            gender: "Female".into(),
            bio: None,
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let conn = open_memory_database().unwrap();
        repository::insert(&conn, &Doctor::new(sample())).unwrap();
        let err = repository::insert(&conn, &Doctor::new(sample())).unwrap_err();
        assert!(err.is_unique_violation("doctors.email"));
    }

    #[test]
    fn optional_bio_round_trips_as_null() {
        let conn = open_memory_database().unwrap();
        let doctor = Doctor::new(sample());
        repository::insert(&conn, &doctor).unwrap();
        let fetched: Doctor =
            repository::get_by(&conn, "id", &doctor.id.to_string()).unwrap();
        assert_eq!(fetched.bio, None);
    }
}

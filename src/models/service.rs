use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{ChangeSet, Entity};
use crate::models::parse_timestamp;

/// A bookable clinical service (consultation, scan, lab panel, …).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub title: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
}

impl Service {
    pub fn new(new: NewService) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Service {
    const TABLE: &'static str = "services";
    const NOUN: &'static str = "Service";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "name",
        "description",
        "price",
        "image",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            title: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            price: row.get(4)?,
            image: row.get(5)?,
            created_at: parse_timestamp(&row.get::<_, String>(6)?),
            updated_at: parse_timestamp(&row.get::<_, String>(7)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.title.clone()),
            Value::from(self.name.clone()),
            Value::from(self.description.clone()),
            Value::from(self.price),
            self.image.clone().map(Value::from).unwrap_or(Value::Null),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChanges {
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl ServiceChanges {
    pub fn into_changes(self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if let Some(title) = self.title {
            changes.push(("title", Value::from(title)));
        }
        if let Some(name) = self.name {
            changes.push(("name", Value::from(name)));
        }
        if let Some(description) = self.description {
            changes.push(("description", Value::from(description)));
        }
        if let Some(price) = self.price {
            changes.push(("price", Value::from(price)));
        }
        if let Some(image) = self.image {
            changes.push(("image", Value::from(image)));
        }
        changes
    }
}

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{ChangeSet, Entity};
use crate::models::parse_timestamp;

/// Legacy catalogue entity, unrelated to the clinical flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    pub fn new(new: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            price: new.price,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const NOUN: &'static str = "Product";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "price",
        "description",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            name: row.get(1)?,
            price: row.get(2)?,
            description: row.get(3)?,
            created_at: parse_timestamp(&row.get::<_, String>(4)?),
            updated_at: parse_timestamp(&row.get::<_, String>(5)?),
        })
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.to_string()),
            Value::from(self.name.clone()),
            Value::from(self.price),
            Value::from(self.description.clone()),
            Value::from(self.created_at.to_rfc3339()),
            Value::from(self.updated_at.to_rfc3339()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ProductChanges {
    pub fn into_changes(self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if let Some(name) = self.name {
            changes.push(("name", Value::from(name)));
        }
        if let Some(price) = self.price {
            changes.push(("price", Value::from(price)));
        }
        if let Some(description) = self.description {
            changes.push(("description", Value::from(description)));
        }
        changes
    }
}

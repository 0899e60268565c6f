//! Generic entity repository.
//!
//! One repository parameterized over the entity schema replaces the
//! per-collection access code: every entity type describes its table,
//! column list and row mapping through the [`Entity`] trait, and the
//! create/get/list/update/delete operations below are shared.
//!
//! Partial updates are expressed as a [`ChangeSet`]: only the supplied
//! columns are written, `updated_at` is refreshed, and unsupplied
//! fields are left untouched.

use rusqlite::types::Value;
use rusqlite::Connection;

use super::DatabaseError;

/// Columns to merge into an existing row, built by the model layer.
/// Enum-valued fields are parsed before they reach the change set, so
/// an undeclared enum value never gets written.
pub type ChangeSet = Vec<(&'static str, Value)>;

/// Schema description for a stored entity type.
pub trait Entity: Sized {
    const TABLE: &'static str;
    /// Human-readable name used in `NotFound` errors ("Patient", …).
    const NOUN: &'static str;
    /// Full column list, in the order `insert_values` and `from_row` use.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
    fn insert_values(&self) -> Vec<Value>;
}

fn select_sql<T: Entity>() -> String {
    format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

/// Persist a new entity. The caller constructs the entity with its
/// store id and timestamps already assigned.
pub fn insert<T: Entity>(conn: &Connection, entity: &T) -> Result<(), DatabaseError> {
    let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders.join(", ")
    );
    conn.execute(&sql, rusqlite::params_from_iter(entity.insert_values()))?;
    Ok(())
}

/// Fetch a single entity by an arbitrary key column ("id" for the
/// store identifier, "u_id" for the patient business key).
pub fn get_by<T: Entity>(conn: &Connection, key: &str, value: &str) -> Result<T, DatabaseError> {
    let sql = format!("{} WHERE {key} = ?1", select_sql::<T>());
    conn.query_row(&sql, rusqlite::params![value], |row| T::from_row(row))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
                entity_type: T::NOUN.to_string(),
                id: value.to_string(),
            },
            e => e.into(),
        })
}

/// All rows of a collection, in no guaranteed order.
pub fn list<T: Entity>(conn: &Connection) -> Result<Vec<T>, DatabaseError> {
    let sql = select_sql::<T>();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| T::from_row(row))?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Merge the supplied columns into an existing row and return the
/// updated entity. An empty change set returns the row unchanged.
pub fn update_by<T: Entity>(
    conn: &Connection,
    key: &str,
    value: &str,
    changes: ChangeSet,
) -> Result<T, DatabaseError> {
    if changes.is_empty() {
        return get_by(conn, key, value);
    }

    let mut assignments: Vec<String> = Vec::with_capacity(changes.len() + 1);
    let mut params: Vec<Value> = Vec::with_capacity(changes.len() + 2);
    for (i, (column, v)) in changes.into_iter().enumerate() {
        assignments.push(format!("{column} = ?{}", i + 1));
        params.push(v);
    }
    let ts_idx = assignments.len() + 1;
    assignments.push(format!("updated_at = ?{ts_idx}"));
    params.push(Value::from(chrono::Utc::now().to_rfc3339()));
    params.push(Value::from(value.to_string()));

    let sql = format!(
        "UPDATE {} SET {} WHERE {key} = ?{}",
        T::TABLE,
        assignments.join(", "),
        ts_idx + 1
    );
    let affected = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: T::NOUN.to_string(),
            id: value.to_string(),
        });
    }
    get_by(conn, key, value)
}

/// Remove a row. `NotFound` when the key does not resolve.
pub fn delete_by<T: Entity>(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    let sql = format!("DELETE FROM {} WHERE {key} = ?1", T::TABLE);
    let affected = conn.execute(&sql, rusqlite::params![value])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: T::NOUN.to_string(),
            id: value.to_string(),
        });
    }
    Ok(())
}

pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Identifier allocation exhausted for {entity_type} after {attempts} attempts")]
    AllocationExhausted { entity_type: String, attempts: u32 },
}

impl DatabaseError {
    /// True when this is a UNIQUE-constraint failure on the given column
    /// (e.g. `"patients.u_id"`). The allocator uses this to tell an
    /// identifier collision apart from other constraint failures.
    pub fn is_unique_violation(&self, column: &str) -> bool {
        match self {
            DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(err, Some(msg))) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains(column)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: Patient with id abc");
    }

    #[test]
    fn unique_violation_matches_column() {
        let inner = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: 2067,
        };
        let err = DatabaseError::Sqlite(rusqlite::Error::SqliteFailure(
            inner,
            Some("UNIQUE constraint failed: patients.u_id".into()),
        ));
        assert!(err.is_unique_violation("patients.u_id"));
        assert!(!err.is_unique_violation("doctors.email"));
    }

    #[test]
    fn non_sqlite_error_is_not_unique_violation() {
        let err = DatabaseError::ConstraintViolation("email taken".into());
        assert!(!err.is_unique_violation("patients.u_id"));
    }
}

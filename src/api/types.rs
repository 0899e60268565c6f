//! Shared state for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::config::Config;

/// Shared context for all routes and middleware: the store connection
/// plus the write-access token.
///
/// Each handler performs at most one store operation under the lock
/// and never holds it across an await point.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub admin_token: Option<Arc<str>>,
    pub allowed_origins: Arc<[String]>,
}

impl ApiContext {
    pub fn new(conn: Connection, config: &Config) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            admin_token: config.admin_token.as_deref().map(Arc::from),
            allowed_origins: config.allowed_origins.clone().into(),
        }
    }

    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }

    /// True when `token` grants write access.
    pub fn authorize_write(&self, token: Option<&str>) -> bool {
        match (&self.admin_token, token) {
            (Some(expected), Some(got)) => expected.as_ref() == got,
            // No configured token means writes are refused outright.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn ctx_with_token(token: Option<&str>) -> ApiContext {
        let config = Config {
            port: 0,
            database_path: std::path::PathBuf::new(),
            allowed_origins: vec![],
            admin_token: token.map(String::from),
        };
        ApiContext::new(open_memory_database().unwrap(), &config)
    }

    #[test]
    fn correct_token_grants_write() {
        let ctx = ctx_with_token(Some("secret"));
        assert!(ctx.authorize_write(Some("secret")));
    }

    #[test]
    fn wrong_or_missing_token_is_refused() {
        let ctx = ctx_with_token(Some("secret"));
        assert!(!ctx.authorize_write(Some("wrong")));
        assert!(!ctx.authorize_write(None));
    }

    #[test]
    fn unconfigured_token_refuses_all_writes() {
        let ctx = ctx_with_token(None);
        assert!(!ctx.authorize_write(Some("anything")));
        assert!(!ctx.authorize_write(None));
    }

    #[test]
    fn conn_grants_store_access() {
        let ctx = ctx_with_token(Some("secret"));
        let conn = ctx.conn().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }
}

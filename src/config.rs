use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CARENET";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port when `CARENET_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Get the application data directory: ~/Carenet/ on all platforms.
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Carenet")
}

/// Default `RUST_LOG`-style filter for the binary.
pub fn default_log_filter() -> &'static str {
    "carenet=info,tower_http=info"
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    /// Origins the browser front end is served from.
    pub allowed_origins: Vec<String>,
    /// Bearer token required for mutating requests. `None` means
    /// writes are refused until one is configured.
    pub admin_token: Option<String>,
}

impl Config {
    /// Read configuration from `CARENET_*` environment variables,
    /// falling back to defaults for everything except the admin token.
    pub fn from_env() -> Self {
        let port = std::env::var("CARENET_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = std::env::var("CARENET_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir().join("carenet.db"));

        let allowed_origins = std::env::var("CARENET_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]);

        let admin_token = std::env::var("CARENET_ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        Config {
            port,
            database_path,
            allowed_origins,
            admin_token,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Carenet"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn bind_addr_uses_configured_port() {
        let config = Config {
            port: 9123,
            database_path: PathBuf::new(),
            allowed_origins: vec![],
            admin_token: None,
        };
        assert_eq!(config.bind_addr().port(), 9123);
    }
}

use tracing_subscriber::EnvFilter;

use carenet::api::{start_server, ApiContext};
use carenet::config::{self, Config};
use carenet::db::open_database;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        app = config::APP_NAME,
        version = config::APP_VERSION,
        port = config.port,
        db = %config.database_path.display(),
        "starting"
    );

    if config.admin_token.is_none() {
        tracing::warn!("CARENET_ADMIN_TOKEN is not set; all write requests will be refused");
    }

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Cannot create data directory");
        }
    }

    let conn = open_database(&config.database_path).expect("Cannot open database");
    let ctx = ApiContext::new(conn, &config);

    let mut server = start_server(ctx, config.bind_addr())
        .await
        .expect("Cannot start API server");

    tokio::signal::ctrl_c()
        .await
        .expect("Cannot listen for shutdown signal");
    tracing::info!("shutdown requested");

    server.shutdown();
    server.wait().await;
}

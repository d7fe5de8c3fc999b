use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::env::ensure_sqlite_dir;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::property::{PropertyRepository, SeaOrmPropertyRepository};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml`, or fall back to `SERVER_*` / `DATABASE_URL` environment variables.
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config.toml unavailable or invalid; using environment");
            let mut cfg = AppConfig {
                server: ServerConfig::from_env(),
                database: DatabaseConfig { url: models::db::DATABASE_URL.clone(), ..DatabaseConfig::default() },
            };
            cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            Ok(cfg)
        }
    }
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Connect the store, create the table if needed and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    ensure_sqlite_dir(&cfg.database.url)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    // DB connection + table
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::ensure_schema(&db).await?;

    let repo: Arc<dyn PropertyRepository> = Arc::new(SeaOrmPropertyRepository::new(db));
    let state = ServerState::new(repo);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server.
/// Expects `.env` and the tracing subscriber to be set up by the caller.
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting property api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let s = ServerConfig { host: "0.0.0.0".into(), port: 9000, ..ServerConfig::default() };
        assert_eq!(bind_addr(&s).unwrap().port(), 9000);
    }

    #[tokio::test]
    async fn build_app_needs_no_process_setup() -> anyhow::Result<()> {
        let cfg = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
                max_connections: 1,
                min_connections: 1,
                ..DatabaseConfig::default()
            },
        };
        let _app: Router = build_app(&cfg).await?;
        Ok(())
    }

    #[test]
    fn startup_errors_name_their_cause() {
        let e = StartupError::InvalidConfig("database.url 为空".into());
        assert_eq!(e.to_string(), "invalid configuration: database.url 为空");
        let e = StartupError::Runtime("cannot create data".into());
        assert_eq!(e.to_string(), "runtime check failed: cannot create data");
    }

    #[test]
    fn bad_host_is_an_error() {
        let s = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(bind_addr(&s).is_err());
    }
}

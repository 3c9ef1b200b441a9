//! Service entry-point: loads settings, prepares storage and serves the REST
//! API with health checks and OpenAPI docs.

mod server;

use std::io;

use actix_web::{rt, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use teamtask::config::TeamTaskSettings;
use teamtask::inbound::http::health::HealthState;
use teamtask::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server, shut_down};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TeamTaskSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;

    let (host, port) = settings.bind_addr();
    let mut config = ServerConfig::new(host, port);
    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("failed to apply migrations: {e}")))?;
        let max_size = settings.max_connections();
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
            .await
            .map_err(|e| io::Error::other(e.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    rt::spawn(async move {
        match rt::signal::ctrl_c().await {
            Ok(()) => shut_down(health_state, handle).await,
            Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
        }
    });
    info!(host = settings.host(), port = settings.port(), "listening");
    server.await
}

use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use autoshop::logging::init_tracing;
use autoshop::metrics::{init_metrics, metrics_app};
use autoshop::{AppState, Storage, init_router};
use autoshop_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig, StorageBackend};
use autoshop_core::PermissionTable;
use autoshop_db::{MemoryStore, init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize logging")?;

    let server_config = ServerConfig::from_env()?;
    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_dev_secrets() {
        warn!("JWT secrets are not configured, using development defaults");
    }

    // A broken permission table is a configuration bug; refuse to start.
    let permissions = PermissionTable::standard().context("Invalid permission table")?;

    let storage = match server_config.storage {
        StorageBackend::Postgres => {
            let database_url = server_config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;
            let pool = init_db_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            Storage::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store, data is lost on shutdown");
            Storage::memory(std::sync::Arc::new(MemoryStore::new()))
        }
    };

    let state = AppState::new(
        storage,
        permissions,
        jwt_config,
        CorsConfig::from_env(),
        RateLimitConfig::from_env(),
    );

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, storage = %server_config.storage, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

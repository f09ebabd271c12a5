//! # Autoshop DB
//!
//! Persistence for the Autoshop API.
//!
//! - [`repositories`]: the collaborator traits services depend on
//! - [`postgres`]: sqlx implementations
//! - [`memory`]: in-process implementation for local runs and tests
//! - [`documents`]: typed helpers over the document store
//!
//! # Example
//!
//! ```ignore
//! use autoshop_db::{init_db_pool, run_migrations, postgres::PgUserRepository};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool.clone());
//! ```

pub mod documents;
pub mod memory;
pub mod postgres;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use repositories::{DocumentStore, OrganizationRepository, UserRepository};
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    tracing::info!("Database pool connected");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

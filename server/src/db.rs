use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Connect to the database and apply pending migrations.
///
/// Fails if the database cannot be reached within the pool's connection
/// timeout; the caller treats that as fatal.
pub fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .connection_timeout(Duration::from_secs(10))
        .build(manager)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .map_err(|e| anyhow::anyhow!("Failed to get DB connection for migrations: {}", e))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    for migration in applied {
        tracing::info!("Applied migration {}", migration);
    }

    Ok(pool)
}

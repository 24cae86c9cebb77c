//! Database and schema bootstrap
//!
//! Run once at startup: make sure the registry database exists, then apply
//! the pending migrations from `migrations/`.

use sqlx::migrate::Migrator;
use sqlx::{Connection, PgConnection, PgPool};
use tracing::{info, instrument};

use crate::error::DatabaseError;
use crate::pool::{DatabaseConfig, DATABASE_ID};

/// Migrations creating the `documents` table and its indexes
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates the registry database when it does not exist yet
///
/// Connects to the maintenance database with the same endpoint and key.
///
/// # Returns
///
/// `true` when the database was created, `false` when it already existed
#[instrument(skip(config), fields(database = DATABASE_ID))]
pub async fn ensure_database(config: &DatabaseConfig) -> Result<bool, DatabaseError> {
    let mut conn = PgConnection::connect_with(&config.maintenance_options()?)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(DATABASE_ID)
            .fetch_one(&mut conn)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

    let created = if exists {
        false
    } else {
        // CREATE DATABASE takes no bind parameters; the name is a constant
        let statement = format!("CREATE DATABASE \"{}\"", DATABASE_ID);
        match sqlx::query(&statement).execute(&mut conn).await {
            Ok(_) => true,
            Err(e) => match DatabaseError::from(&e) {
                // Created concurrently by another instance
                DatabaseError::DuplicateEntry(_) => false,
                other => return Err(other),
            },
        }
    };

    conn.close()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    if created {
        info!("Created database");
    }
    Ok(created)
}

/// Applies pending migrations
///
/// Applied versions are recorded in `_sqlx_migrations`, so repeated calls
/// are no-ops.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    info!(migrations = MIGRATOR.iter().count(), "Document schema is up to date");
    Ok(())
}

//! Database connection pool management
//!
//! The registry is configured the way a document database account is: an
//! endpoint URI and an access key. The database name is fixed to
//! [`DATABASE_ID`]; the endpoint never selects it.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Name of the database holding every registry container
pub const DATABASE_ID: &str = "registry";

/// Database used to create [`DATABASE_ID`] when it does not exist yet
pub const MAINTENANCE_DATABASE: &str = "postgres";

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://registry@localhost:5432", "secret")
///     .max_connections(20)
///     .min_connections(5)
///     .connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Endpoint URI (`postgres://user@host:port`)
    pub endpoint: String,
    /// Access key, used as the connection password
    pub access_key: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
    /// Idle timeout before closing a connection
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a configuration for an endpoint and access key with default pool settings
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    /// Sets the maximum number of connections in the pool (default: 10)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections to maintain (default: 2)
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout duration (default: 30s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum lifetime of a connection (default: 30 min)
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets the idle timeout before closing a connection (default: 10 min)
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Connection options for the registry database
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidConfig` if the endpoint is not a valid URI
    pub fn connect_options(&self) -> Result<PgConnectOptions, DatabaseError> {
        self.options_for(DATABASE_ID)
    }

    /// Connection options for the maintenance database
    pub fn maintenance_options(&self) -> Result<PgConnectOptions, DatabaseError> {
        self.options_for(MAINTENANCE_DATABASE)
    }

    fn options_for(&self, database: &str) -> Result<PgConnectOptions, DatabaseError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(DatabaseError::InvalidConfig("endpoint must not be empty".to_string()));
        }

        let mut options = PgConnectOptions::from_str(endpoint)
            .map_err(|e| DatabaseError::InvalidConfig(e.to_string()))?
            .database(database);
        if !self.access_key.is_empty() {
            options = options.password(&self.access_key);
        }
        Ok(options)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost:5432", "")
    }
}

/// Creates a connection pool to the registry database
///
/// # Errors
///
/// Returns `DatabaseError::InvalidConfig` for a malformed endpoint and
/// `DatabaseError::ConnectionFailed` if the pool cannot be created
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, create_pool};
///
/// let config = DatabaseConfig::new("postgres://registry@localhost", "secret");
/// let pool = create_pool(config).await?;
/// ```
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        endpoint = %config.endpoint,
        database = DATABASE_ID,
        "Creating database pool with max_connections={}, min_connections={}",
        config.max_connections, config.min_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect_with(config.connect_options()?)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}

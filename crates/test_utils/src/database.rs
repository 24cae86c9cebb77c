//! Database Test Utilities
//!
//! Starts a PostgreSQL test container and bootstraps the registry database in
//! it the same way the server does on startup.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

use infra_db::{
    create_pool, ensure_database, ensure_schema, DatabaseConfig, PostgresDocumentStore,
    MAINTENANCE_DATABASE,
};

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "registry_test";
const POSTGRES_PASSWORD: &str = "test_access_key";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A PostgreSQL test container with the registry database bootstrapped
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: DatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container, creates the registry database and applies the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or bootstrap fails
    pub async fn new() -> Result<Self, BoxError> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", MAINTENANCE_DATABASE)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = DatabaseConfig::new(
            format!("postgres://{}@{}:{}", POSTGRES_USER, host, port),
            POSTGRES_PASSWORD,
        )
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30));

        ensure_database(&config).await?;
        let pool = create_pool(config.clone()).await?;
        ensure_schema(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns a document store over this database
    pub fn store(&self) -> PostgresDocumentStore {
        PostgresDocumentStore::new(self.pool.clone())
    }

    /// Removes every document while preserving the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::query("TRUNCATE TABLE documents")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Global test database for shared integration tests
static SHARED_TEST_DB: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// Gets or creates a shared test database instance
///
/// Tests sharing it should write to their own container names.
///
/// # Panics
///
/// Panics if the database fails to initialize
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED_TEST_DB
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::new()
                    .await
                    .expect("Failed to create shared test database"),
            )
        })
        .await
        .clone()
}

/// Creates an isolated test database for a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::new().await
}

/// Helper macro for tests that need their own database
///
/// The body sees `db: TestDatabase` and `store: PostgresDocumentStore`. The
/// generated test is ignored unless run with `--ignored` (it needs Docker).
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$db:ident, $store:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires docker"]
        async fn $name() {
            let $db = $crate::database::create_isolated_test_database()
                .await
                .expect("Failed to create test database");
            let $store = $db.store();
            $body
        }
    };
}

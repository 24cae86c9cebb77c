//! Infrastructure Database Layer
//!
//! This crate stores the registry's document containers in PostgreSQL using
//! SQLx. Every container lives in one `documents` table as JSONB bodies; the
//! `PostgresDocumentStore` implements the `DocumentStore` port on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{bootstrap, create_pool, DatabaseConfig, PostgresDocumentStore};
//!
//! let config = DatabaseConfig::new("postgres://registry@localhost:5432", key);
//! bootstrap::ensure_database(&config).await?;
//! let pool = create_pool(config).await?;
//! bootstrap::ensure_schema(&pool).await?;
//!
//! let store = PostgresDocumentStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod bootstrap;
pub mod document_store;

pub use pool::{DatabasePool, create_pool, DatabaseConfig, DATABASE_ID, MAINTENANCE_DATABASE};
pub use error::DatabaseError;
pub use bootstrap::{ensure_database, ensure_schema, MIGRATOR};
pub use document_store::PostgresDocumentStore;

//! Document database abstractions
//!
//! - `store`: the `DocumentStore` port over raw JSON documents
//! - `query`: parameterized SQL-like query specifications
//! - `repository`: the typed `Repository<T>` used by domain services
//! - `memory`: an in-memory store for tests (feature `mock`)

pub mod query;
pub mod store;
pub mod repository;
#[cfg(any(test, feature = "mock"))]
pub mod memory;

pub use query::{QuerySpec, QueryParameter, DEFAULT_PAGE_SIZE};
pub use store::{Document, DocumentStore, FeedOptions, FeedPage};
pub use repository::Repository;
#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryDocumentStore;

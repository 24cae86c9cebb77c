//! Core Kernel - Foundational types shared by the registry crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed document identifiers
//! - The unified port error and adapter health types
//! - The `DocumentStore` port, query specifications and the typed `Repository<T>`

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod documents;

pub use identifiers::{PersonId, UserKey};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use documents::{
    Document, DocumentStore, FeedOptions, FeedPage, QuerySpec, QueryParameter, Repository,
    DEFAULT_PAGE_SIZE,
};
#[cfg(any(test, feature = "mock"))]
pub use documents::InMemoryDocumentStore;

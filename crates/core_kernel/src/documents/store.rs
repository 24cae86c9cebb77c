//! Document store port
//!
//! `DocumentStore` is the seam between the registry and whatever document
//! database holds its containers. It works on raw JSON bodies; the typed
//! `Repository<T>` sits on top of it.
//!
//! Every point operation is addressed by `(container, partition key, id)`.
//! Identifiers are unique within a container.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::documents::query::{QuerySpec, DEFAULT_PAGE_SIZE};
use crate::ports::{DomainPort, HealthCheckable, PortError};

/// An item that can be stored in a document container
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// The document identifier, unique within its container
    fn id(&self) -> &str;

    /// The partition key used to route the document
    ///
    /// Defaults to the identifier.
    fn partition_key(&self) -> &str {
        self.id()
    }
}

/// Paging options for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Maximum number of documents returned per page (at least 1)
    pub max_item_count: u32,
}

impl FeedOptions {
    /// Creates options with the given page size, clamped to at least 1
    pub fn page_size(max_item_count: u32) -> Self {
        Self {
            max_item_count: max_item_count.max(1),
        }
    }
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self::page_size(DEFAULT_PAGE_SIZE)
    }
}

/// One page of query results
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    /// Documents in identifier order
    pub items: Vec<Value>,
    /// Opaque token to resume after the last item, when more results remain
    pub continuation: Option<String>,
}

impl FeedPage {
    pub fn has_more_results(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Port for document database operations
#[async_trait]
pub trait DocumentStore: DomainPort + HealthCheckable {
    /// Reads a single document
    ///
    /// # Returns
    ///
    /// The document body, or `PortError::NotFound`
    async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, PortError>;

    /// Reads one page of documents matching `query`, ordered by identifier
    ///
    /// Pass the previous page's continuation to resume.
    async fn query_items(
        &self,
        container: &str,
        query: &QuerySpec,
        options: FeedOptions,
        continuation: Option<String>,
    ) -> Result<FeedPage, PortError>;

    /// Inserts a new document
    ///
    /// # Returns
    ///
    /// The stored body, or `PortError::Conflict` when the identifier is taken
    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError>;

    /// Replaces an existing document
    ///
    /// # Returns
    ///
    /// The stored body, or `PortError::NotFound` when nothing is stored under `id`
    async fn replace_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError>;

    /// Inserts the document or replaces the one with the same identifier
    async fn upsert_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError>;

    /// Deletes a document
    ///
    /// # Returns
    ///
    /// `PortError::NotFound` when nothing is stored under `id`
    async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<(), PortError>;
}

/// Extracts the non-blank string `id` property of a document body
pub fn document_id(item: &Value) -> Result<&str, PortError> {
    match item.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(PortError::validation_field(
            "document must carry a non-blank string id",
            "id",
        )),
    }
}

/// Checks that a replacement body targets the addressed document
pub fn ensure_same_id(id: &str, item: &Value) -> Result<(), PortError> {
    let body_id = document_id(item)?;
    if body_id != id {
        return Err(PortError::validation_field(
            format!("document id '{}' does not match '{}'", body_id, id),
            "id",
        ));
    }
    Ok(())
}

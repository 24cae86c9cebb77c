//! In-memory document store
//!
//! Keeps containers in ordered maps so paging behaves like the database
//! adapter. Useful for unit and HTTP tests without a running database.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::documents::query::QuerySpec;
use crate::documents::store::{document_id, ensure_same_id, DocumentStore, FeedOptions, FeedPage};
use crate::ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};

#[derive(Debug, Clone)]
struct StoredDocument {
    partition_key: String,
    body: Value,
}

type Container = BTreeMap<String, StoredDocument>;

/// In-memory implementation of `DocumentStore`
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    containers: RwLock<HashMap<String, Container>>,
    unavailable: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: every operation fails with `ServiceUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the number of documents in a container
    pub async fn len(&self, container: &str) -> usize {
        self.containers
            .read()
            .await
            .get(container)
            .map_or(0, BTreeMap::len)
    }

    /// Returns true when a container holds no documents
    pub async fn is_empty(&self, container: &str) -> bool {
        self.len(container).await == 0
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: "in-memory document store".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(container: &str, id: &str) -> PortError {
    PortError::not_found(format!("Document in '{}'", container), id)
}

impl DomainPort for InMemoryDocumentStore {}

#[async_trait]
impl HealthCheckable for InMemoryDocumentStore {
    async fn health_check(&self) -> HealthCheckResult {
        let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
            (AdapterHealth::Unhealthy, "Simulated outage")
        } else {
            (AdapterHealth::Healthy, "In-memory store always reachable")
        };

        HealthCheckResult {
            adapter_id: "in-memory-document-store".to_string(),
            status,
            latency_ms: 0,
            message: Some(message.to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, PortError> {
        self.check_available()?;
        self.containers
            .read()
            .await
            .get(container)
            .and_then(|c| c.get(id))
            .filter(|doc| doc.partition_key == partition_key)
            .map(|doc| doc.body.clone())
            .ok_or_else(|| not_found(container, id))
    }

    async fn query_items(
        &self,
        container: &str,
        query: &QuerySpec,
        options: FeedOptions,
        continuation: Option<String>,
    ) -> Result<FeedPage, PortError> {
        self.check_available()?;
        let containers = self.containers.read().await;
        let Some(documents) = containers.get(container) else {
            return Ok(FeedPage::default());
        };

        let lower = match continuation {
            Some(after) => Bound::Excluded(after),
            None => Bound::Unbounded,
        };
        let limit = options.max_item_count as usize;

        let mut matching = documents
            .range((lower, Bound::Unbounded))
            .filter(|(_, doc)| query.matches(&doc.body));

        let mut items = Vec::with_capacity(limit.min(documents.len()));
        let mut last_id = None;
        for (id, doc) in matching.by_ref().take(limit) {
            items.push(doc.body.clone());
            last_id = Some(id.clone());
        }

        let continuation = if matching.next().is_some() { last_id } else { None };

        Ok(FeedPage { items, continuation })
    }

    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        self.check_available()?;
        let id = document_id(&item)?.to_string();
        let mut containers = self.containers.write().await;
        let documents = containers.entry(container.to_string()).or_default();

        if documents.contains_key(&id) {
            return Err(PortError::conflict(format!(
                "document '{}' already exists in '{}'",
                id, container
            )));
        }

        documents.insert(
            id,
            StoredDocument {
                partition_key: partition_key.to_string(),
                body: item.clone(),
            },
        );
        Ok(item)
    }

    async fn replace_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        self.check_available()?;
        ensure_same_id(id, &item)?;
        let mut containers = self.containers.write().await;
        let doc = containers
            .get_mut(container)
            .and_then(|c| c.get_mut(id))
            .filter(|doc| doc.partition_key == partition_key)
            .ok_or_else(|| not_found(container, id))?;

        doc.body = item.clone();
        Ok(item)
    }

    async fn upsert_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        self.check_available()?;
        let id = document_id(&item)?.to_string();
        self.containers
            .write()
            .await
            .entry(container.to_string())
            .or_default()
            .insert(
                id,
                StoredDocument {
                    partition_key: partition_key.to_string(),
                    body: item.clone(),
                },
            );
        Ok(item)
    }

    async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<(), PortError> {
        self.check_available()?;
        let mut containers = self.containers.write().await;
        let documents = containers
            .get_mut(container)
            .ok_or_else(|| not_found(container, id))?;

        let present = documents
            .get(id)
            .is_some_and(|doc| doc.partition_key == partition_key);
        if !present {
            return Err(not_found(container, id));
        }

        documents.remove(id);
        Ok(())
    }
}

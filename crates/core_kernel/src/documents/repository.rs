//! Typed repository over a document container
//!
//! `Repository<T>` binds an injected `DocumentStore`, a container name and an
//! item type. It owns the translation rules the rest of the registry relies
//! on:
//!
//! - the partition key is always the document identifier
//! - a missing document on `get` is `Ok(None)`, on `delete` is `Ok(false)`
//! - identifiers containing NUL can never be stored and read as missing
//! - every other failure propagates unchanged
//! - queries drain every page, so callers always see complete result sets

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::documents::query::QuerySpec;
use crate::documents::store::{Document, DocumentStore, FeedOptions};
use crate::ports::PortError;

/// Typed CRUD access to one container
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    container: String,
    options: FeedOptions,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            container: self.container.clone(),
            options: self.options,
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("container", &self.container)
            .field("options", &self.options)
            .finish()
    }
}

impl<T: Document> Repository<T> {
    /// Creates a repository for `container` on the given store
    pub fn new(store: Arc<dyn DocumentStore>, container: impl Into<String>) -> Self {
        Self {
            store,
            container: container.into(),
            options: FeedOptions::default(),
            _item: PhantomData,
        }
    }

    /// Sets the number of documents fetched per page when querying
    pub fn with_page_size(mut self, max_item_count: u32) -> Self {
        self.options = FeedOptions::page_size(max_item_count);
        self
    }

    /// Returns the container name
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Returns the underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Lists every document in the container
    pub async fn list(&self) -> Result<Vec<T>, PortError> {
        self.query(&QuerySpec::select_all()).await
    }

    /// Runs a query and collects every page of results
    #[instrument(skip(self, spec), fields(container = %self.container, query = %spec))]
    pub async fn query(&self, spec: &QuerySpec) -> Result<Vec<T>, PortError> {
        let mut results = Vec::new();
        let mut continuation = None;

        loop {
            let page = self
                .store
                .query_items(&self.container, spec, self.options, continuation.clone())
                .await?;

            debug!(items = page.items.len(), more = page.has_more_results(), "Read query page");

            for item in page.items {
                results.push(serde_json::from_value(item)?);
            }

            match page.continuation {
                Some(next) if continuation.as_ref() == Some(&next) => {
                    return Err(PortError::internal(format!(
                        "store repeated continuation token '{}'",
                        next
                    )));
                }
                Some(next) => continuation = Some(next),
                None => break,
            }
        }

        Ok(results)
    }

    /// Returns the first document matching a query, if any
    pub async fn find_one(&self, spec: &QuerySpec) -> Result<Option<T>, PortError> {
        let page = self
            .store
            .query_items(&self.container, spec, FeedOptions::page_size(1), None)
            .await?;

        page.items
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
            .map_err(PortError::from)
    }

    /// Reads a document by identifier
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no document is stored under `id`
    #[instrument(skip(self), fields(container = %self.container))]
    pub async fn get(&self, id: &str) -> Result<Option<T>, PortError> {
        if id.trim().is_empty() || !is_storable(id) {
            return Ok(None);
        }

        match self.store.read_item(&self.container, id, id).await {
            Ok(body) => Ok(Some(serde_json::from_value(body)?)),
            Err(e) if e.is_not_found() => {
                debug!(id, "Document not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Inserts a new document
    #[instrument(skip(self, item), fields(container = %self.container, id = item.id()))]
    pub async fn create(&self, item: &T) -> Result<T, PortError> {
        let body = to_body(item)?;
        let stored = self
            .store
            .create_item(&self.container, item.partition_key(), body)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Replaces the document stored under `id`
    ///
    /// # Errors
    ///
    /// Validation error for a blank `id`; `NotFound` for an `id` that cannot
    /// be stored or that the store does not hold
    #[instrument(skip(self, item), fields(container = %self.container))]
    pub async fn replace(&self, id: &str, item: &T) -> Result<T, PortError> {
        if id.trim().is_empty() {
            return Err(PortError::validation_field("document id must not be blank", "id"));
        }
        if !is_storable(id) {
            return Err(PortError::not_found(format!("Document in '{}'", self.container), id));
        }

        let body = to_body(item)?;
        let stored = self
            .store
            .replace_item(&self.container, id, id, body)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Inserts the document or replaces the one with the same identifier
    #[instrument(skip(self, item), fields(container = %self.container, id = item.id()))]
    pub async fn upsert(&self, item: &T) -> Result<T, PortError> {
        let body = to_body(item)?;
        let stored = self
            .store
            .upsert_item(&self.container, item.partition_key(), body)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Deletes the document stored under `id`
    ///
    /// # Returns
    ///
    /// `true` when a document was removed, `false` when none existed
    #[instrument(skip(self), fields(container = %self.container))]
    pub async fn delete(&self, id: &str) -> Result<bool, PortError> {
        if id.trim().is_empty() {
            return Err(PortError::validation_field("document id must not be blank", "id"));
        }
        if !is_storable(id) {
            return Ok(false);
        }

        match self.store.delete_item(&self.container, id, id).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// PostgreSQL text columns reject NUL, so no stored identifier contains one
fn is_storable(id: &str) -> bool {
    !id.contains('\0')
}

fn to_body<T: Document>(item: &T) -> Result<Value, PortError> {
    Ok(serde_json::to_value(item)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::memory::InMemoryDocumentStore;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
        tag: String,
    }

    impl Document for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, tag: &str) -> Note {
        Note {
            id: id.to_string(),
            text: format!("note {}", id),
            tag: tag.to_string(),
        }
    }

    fn repository() -> (Arc<InMemoryDocumentStore>, Repository<Note>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repo = Repository::new(store.clone(), "notes");
        (store, repo)
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (_, repo) = repository();
        assert_eq!(repo.get("nope").await.unwrap(), None);
        assert_eq!(repo.get("  ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, repo) = repository();
        let created = repo.create(&note("1", "a")).await.unwrap();
        assert_eq!(repo.get("1").await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let (_, repo) = repository();
        repo.create(&note("1", "a")).await.unwrap();

        assert!(repo.delete("1").await.unwrap());
        assert!(!repo.delete("1").await.unwrap());
        assert_eq!(repo.get("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_ids_rejected_on_writes() {
        let (_, repo) = repository();
        assert!(repo.replace(" ", &note("1", "a")).await.is_err());
        assert!(repo.delete("").await.is_err());
    }

    #[tokio::test]
    async fn test_replace_requires_existing() {
        let (_, repo) = repository();
        let err = repo.replace("1", &note("1", "a")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upsert_creates_and_overwrites() {
        let (store, repo) = repository();
        repo.upsert(&note("1", "a")).await.unwrap();
        repo.upsert(&note("1", "b")).await.unwrap();

        assert_eq!(store.len("notes").await, 1);
        assert_eq!(repo.get("1").await.unwrap().unwrap().tag, "b");
    }

    #[tokio::test]
    async fn test_list_drains_all_pages() {
        let (_, repo) = repository();
        let repo = repo.with_page_size(2);
        for i in 0..7 {
            repo.create(&note(&format!("{:02}", i), "a")).await.unwrap();
        }

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["00", "01", "02", "03", "04", "05", "06"]);
    }

    #[tokio::test]
    async fn test_query_and_find_one() {
        let (_, repo) = repository();
        repo.create(&note("1", "red")).await.unwrap();
        repo.create(&note("2", "blue")).await.unwrap();
        repo.create(&note("3", "red")).await.unwrap();

        let red = repo
            .query(&QuerySpec::select_all().where_eq("tag", "red"))
            .await
            .unwrap();
        assert_eq!(red.len(), 2);

        let by_id = repo.find_one(&QuerySpec::by_id("2")).await.unwrap();
        assert_eq!(by_id.map(|n| n.tag), Some("blue".to_string()));

        let none = repo.find_one(&QuerySpec::by_id("9")).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_nul_ids_are_absent_without_reaching_the_store() {
        let (store, repo) = repository();
        store.set_unavailable(true);

        assert_eq!(repo.get("a\0b").await.unwrap(), None);
        assert!(!repo.delete("a\0b").await.unwrap());
        let err = repo.replace("a\0b", &note("a\0b", "x")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let (store, repo) = repository();
        store.set_unavailable(true);

        let err = repo.get("1").await.unwrap_err();
        assert!(matches!(err, PortError::ServiceUnavailable { .. }));
        assert!(repo.delete("1").await.is_err());
    }
}

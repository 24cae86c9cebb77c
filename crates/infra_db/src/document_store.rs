//! PostgreSQL document store
//!
//! Implements the `DocumentStore` port on a single `documents` table holding
//! JSONB bodies keyed by `(container, id)`. Query filters become `body @> $n`
//! containment predicates with bound parameters, and paging is keyset-based
//! on the identifier in byte order.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use tracing::{debug, instrument};

use core_kernel::documents::store::{document_id, ensure_same_id};
use core_kernel::{
    AdapterHealth, DocumentStore, DomainPort, FeedOptions, FeedPage, HealthCheckResult,
    HealthCheckable, PortError, QuerySpec,
};

use crate::error::port_error;

const ADAPTER_ID: &str = "postgres-document-store";

/// Health check round trips slower than this report the store as degraded
pub const SLOW_HEALTH_CHECK_MS: u64 = 500;

/// PostgreSQL-backed implementation of `DocumentStore`
///
/// # Error Handling
///
/// - missing rows -> `PortError::NotFound`
/// - unique violations -> `PortError::Conflict`
/// - pool timeouts -> `PortError::ServiceUnavailable`
/// - other database failures -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn not_found(container: &str, id: &str) -> PortError {
    PortError::not_found(format!("Document in '{}'", container), id)
}

impl DomainPort for PostgresDocumentStore {}

#[async_trait]
impl HealthCheckable for PostgresDocumentStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (status, message) = classify_health(result.map(|_| ()), latency_ms);

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

fn classify_health(
    result: Result<(), sqlx::Error>,
    latency_ms: u64,
) -> (AdapterHealth, Option<String>) {
    match result {
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        Ok(()) if latency_ms > SLOW_HEALTH_CHECK_MS => (
            AdapterHealth::Degraded,
            Some(format!("Slow response: {}ms", latency_ms)),
        ),
        Ok(()) => (AdapterHealth::Healthy, None),
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self))]
    async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Value, PortError> {
        let body = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body FROM documents
            WHERE container = $1 AND id = $2 AND partition_key = $3
            "#,
        )
        .bind(container)
        .bind(id)
        .bind(partition_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(port_error)?;

        body.map(|Json(body)| body)
            .ok_or_else(|| not_found(container, id))
    }

    #[instrument(skip(self, query, options), fields(query = %query, page_size = options.max_item_count))]
    async fn query_items(
        &self,
        container: &str,
        query: &QuerySpec,
        options: FeedOptions,
        continuation: Option<String>,
    ) -> Result<FeedPage, PortError> {
        let limit = options.max_item_count as usize;

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT id, body FROM documents WHERE container = ");
        builder.push_bind(container);
        for pattern in query.containment_patterns() {
            builder.push(" AND body @> ").push_bind(Json(pattern));
        }
        if let Some(after) = continuation {
            builder.push(r#" AND id COLLATE "C" > "#).push_bind(after);
        }
        builder
            .push(r#" ORDER BY id COLLATE "C" LIMIT "#)
            .push_bind(i64::from(options.max_item_count) + 1);

        let mut rows: Vec<(String, Json<Value>)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(port_error)?;

        let continuation = if rows.len() > limit {
            rows.truncate(limit);
            rows.last().map(|(id, _)| id.clone())
        } else {
            None
        };
        debug!(items = rows.len(), more = continuation.is_some(), "Fetched page");

        Ok(FeedPage {
            items: rows.into_iter().map(|(_, Json(body))| body).collect(),
            continuation,
        })
    }

    #[instrument(skip(self, item))]
    async fn create_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        let id = document_id(&item)?.to_string();

        let Json(body) = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            INSERT INTO documents (container, id, partition_key, body)
            VALUES ($1, $2, $3, $4)
            RETURNING body
            "#,
        )
        .bind(container)
        .bind(&id)
        .bind(partition_key)
        .bind(Json(&item))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match port_error(e) {
            PortError::Conflict { .. } => PortError::conflict(format!(
                "document '{}' already exists in '{}'",
                id, container
            )),
            other => other,
        })?;

        Ok(body)
    }

    #[instrument(skip(self, item))]
    async fn replace_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        ensure_same_id(id, &item)?;

        let body = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            UPDATE documents
            SET body = $4, updated_at = now()
            WHERE container = $1 AND id = $2 AND partition_key = $3
            RETURNING body
            "#,
        )
        .bind(container)
        .bind(id)
        .bind(partition_key)
        .bind(Json(&item))
        .fetch_optional(&self.pool)
        .await
        .map_err(port_error)?;

        body.map(|Json(body)| body)
            .ok_or_else(|| not_found(container, id))
    }

    #[instrument(skip(self, item))]
    async fn upsert_item(
        &self,
        container: &str,
        partition_key: &str,
        item: Value,
    ) -> Result<Value, PortError> {
        let id = document_id(&item)?.to_string();

        let Json(body) = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            INSERT INTO documents (container, id, partition_key, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (container, id) DO UPDATE
            SET body = EXCLUDED.body,
                partition_key = EXCLUDED.partition_key,
                updated_at = now()
            RETURNING body
            "#,
        )
        .bind(container)
        .bind(&id)
        .bind(partition_key)
        .bind(Json(&item))
        .fetch_one(&self.pool)
        .await
        .map_err(port_error)?;

        Ok(body)
    }

    #[instrument(skip(self))]
    async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<(), PortError> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE container = $1 AND id = $2 AND partition_key = $3",
        )
        .bind(container)
        .bind(id)
        .bind(partition_key)
        .execute(&self.pool)
        .await
        .map_err(port_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(container, id));
        }
        Ok(())
    }
}

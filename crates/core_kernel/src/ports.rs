//! Ports and Adapters Infrastructure
//!
//! Foundational types shared by every port in the registry: the unified
//! `PortError`, the `DomainPort` marker and adapter health reporting.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   PersonService / HTTP handlers              │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │   Repository<T>  (typed, per container)      │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │   DocumentStore port (raw JSON documents)    │
//! └──────────────────────────────────────────────┘
//!          ▲                          ▲
//!   ┌──────┴───────┐          ┌───────┴────────┐
//!   │  PostgreSQL  │          │   In-memory    │
//!   │  (infra_db)  │          │ (feature mock) │
//!   └──────────────┘          └────────────────┘
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backing system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A document could not be converted to or from its typed form
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error indicates the entity already exists
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

impl From<serde_json::Error> for PortError {
    fn from(err: serde_json::Error) -> Self {
        PortError::Transformation {
            message: err.to_string(),
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Returns true unless the adapter reported itself unhealthy
    pub fn is_available(&self) -> bool {
        self.status != AdapterHealth::Unhealthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Person", "123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Person"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_transient() {
        let unavailable = PortError::ServiceUnavailable {
            service: "document store".to_string(),
        };
        assert!(unavailable.is_transient());

        let validation = PortError::validation("Invalid email");
        assert!(!validation.is_transient());
    }

    #[test]
    fn test_degraded_adapter_is_still_available() {
        let result = |status| HealthCheckResult {
            adapter_id: "store".to_string(),
            status,
            latency_ms: 0,
            message: None,
            checked_at: chrono::Utc::now(),
        };

        assert!(result(AdapterHealth::Healthy).is_available());
        assert!(result(AdapterHealth::Degraded).is_available());
        assert!(!result(AdapterHealth::Unhealthy).is_available());
    }

    #[test]
    fn test_conflict_helper() {
        let error = PortError::conflict("id already exists");
        assert!(error.is_conflict());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_serde_error_becomes_transformation() {
        let bad: Result<u32, _> = serde_json::from_str("\"nope\"");
        let error: PortError = bad.unwrap_err().into();
        assert!(matches!(error, PortError::Transformation { .. }));
    }
}

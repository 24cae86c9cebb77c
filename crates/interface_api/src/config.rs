//! API configuration

use serde::Deserialize;

use infra_db::DatabaseConfig;

/// API configuration
///
/// Read from `API_*` environment variables, e.g. `API_DOCSTORE_ENDPOINT`.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Document store endpoint URI
    pub docstore_endpoint: String,
    /// Document store access key
    pub docstore_key: String,
    /// Maximum document store connections
    pub docstore_max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            docstore_endpoint: "postgres://registry@localhost:5432".to_string(),
            docstore_key: String::new(),
            docstore_max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Unset variables take the `Default` values.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("docstore_endpoint", defaults.docstore_endpoint)?
            .set_default("docstore_key", defaults.docstore_key)?
            .set_default("docstore_max_connections", i64::from(defaults.docstore_max_connections))?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the document store
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.docstore_endpoint, &self.docstore_key)
            .max_connections(self.docstore_max_connections)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("docstore_endpoint", &self.docstore_endpoint)
            .field("docstore_key", &"<redacted>")
            .field("docstore_max_connections", &self.docstore_max_connections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..ApiConfig::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_database_config_carries_key_and_pool_size() {
        let config = ApiConfig {
            docstore_key: "k3y".to_string(),
            docstore_max_connections: 4,
            ..ApiConfig::default()
        };
        let db = config.database_config();
        assert_eq!(db.access_key, "k3y");
        assert_eq!(db.max_connections, 4);
        assert!(!format!("{:?}", config).contains("k3y"));
    }
}

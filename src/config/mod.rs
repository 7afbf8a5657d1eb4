//! Configuration loading and management

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or checking the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Prefix every resource route is mounted under (e.g. `/api`)
    pub route_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            route_prefix: "/api".to_string(),
        }
    }
}

/// Collection-wide pagination defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub items_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { items_per_page: 20 }
    }
}

/// Per-resource overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub items_per_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    pub pizzas: ResourceConfig,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            pizzas: ResourceConfig {
                items_per_page: Some(5),
            },
        }
    }
}

/// Which store backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
}

/// Sample data loaded into the store at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    pub load_on_startup: bool,
    pub count: usize,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            load_on_startup: false,
            count: 100,
        }
    }
}

/// Complete configuration of the pizza API
///
/// Every section is optional in YAML; missing values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub resources: ResourcesConfig,
    pub storage: StorageConfig,
    pub fixtures: FixturesConfig,
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be served
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "pagination.items_per_page must be at least 1".to_string(),
            ));
        }
        if self.resources.pizzas.items_per_page == Some(0) {
            return Err(ConfigError::Invalid(
                "resources.pizzas.items_per_page must be at least 1".to_string(),
            ));
        }

        let prefix = &self.server.route_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::Invalid(format!(
                "server.route_prefix '{}' must start with '/' and not end with one",
                prefix
            )));
        }

        if self.storage.backend == StorageBackend::Postgres
            && self
                .storage
                .database_url
                .as_deref()
                .is_none_or(str::is_empty)
        {
            return Err(ConfigError::Invalid(
                "storage.database_url is required for the postgres backend".to_string(),
            ));
        }

        Ok(())
    }

    /// Page size of the pizza collection
    pub fn pizza_items_per_page(&self) -> usize {
        self.resources
            .pizzas
            .items_per_page
            .unwrap_or(self.pagination.items_per_page)
    }

    /// Address the server listens on
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                ConfigError::Invalid(format!(
                    "server address '{}:{}': {}",
                    self.server.host, self.server.port, e
                ))
            })
    }
}

//! Server host for transport-agnostic API exposure
//!
//! This module provides a `ServerHost` structure that contains the state
//! needed to expose the API: the validated configuration and the pizza
//! service. The REST exposure consumes it to build its router.

use crate::config::ApiConfig;
use crate::core::service::PizzaService;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(ApiConfig::default(), Arc::new(InMemoryPizzaService::new()))?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<ApiConfig>,

    /// Store behind every pizza operation
    pub service: Arc<dyn PizzaService>,
}

impl ServerHost {
    /// Build the host, refusing a configuration that cannot be served
    pub fn new(config: ApiConfig, service: Arc<dyn PizzaService>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            service,
        })
    }
}

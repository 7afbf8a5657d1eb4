//! # Pizza API
//!
//! A REST API exposing pizzas as a JSON-LD resource with Hydra collections.
//!
//! ## Features
//!
//! - **CRUD over one resource**: list, read, create, merge-patch and delete
//! - **Hydra collections**: total count, page links and a `name` search template
//! - **Field rules**: every violated rule is reported, in field order
//! - **Write-once `special`**: fixed at creation, ignored afterwards
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind `postgres`
//! - **Configuration-Based**: listener, prefix, page sizes and storage from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pizza_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = InMemoryPizzaService::new();
//!     PizzaStory::new().build(&service).await?;
//!
//!     ServerBuilder::new()
//!         .with_config(ApiConfig::default())
//!         .with_service(service)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod fixtures;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Pizza, PizzaWrite},
        error::{ApiError, ApiResult},
        query::{Page, PageRequest, PizzaFilter},
        service::PizzaService,
        validation::{ConstraintViolation, ConstraintViolationList, validate},
    };

    // === Storage ===
    pub use crate::storage::InMemoryPizzaService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresPizzaService;

    // === Fixtures ===
    pub use crate::fixtures::{PizzaFactory, PizzaStory};

    // === Config ===
    pub use crate::config::{ApiConfig, ConfigError, StorageBackend};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}

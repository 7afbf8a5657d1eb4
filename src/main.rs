//! `pizza-api` server binary
//!
//! ```sh
//! pizza-api [config.yaml]
//! PIZZA_API_CONFIG=config.yaml pizza-api
//! RUST_LOG=pizza_api=debug pizza-api
//! ```

use anyhow::Result;
use pizza_api::config::{ApiConfig, StorageBackend};
use pizza_api::core::service::PizzaService;
use pizza_api::fixtures::PizzaStory;
use pizza_api::server::ServerBuilder;
use pizza_api::storage::InMemoryPizzaService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "pizza_api=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = load_config()?;
    let service = open_service(&config).await?;

    if config.fixtures.load_on_startup {
        PizzaStory::with_count(config.fixtures.count)
            .build(service.as_ref())
            .await?;
    }

    ServerBuilder::new()
        .with_config(config)
        .with_service_arc(service)
        .serve()
        .await
}

fn load_config() -> Result<ApiConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PIZZA_API_CONFIG").ok());

    match path {
        Some(path) => {
            tracing::info!(%path, "loading configuration");
            Ok(ApiConfig::from_yaml_file(&path)?)
        }
        None => {
            tracing::info!("no configuration file given, using defaults");
            Ok(ApiConfig::default())
        }
    }
}

async fn open_service(config: &ApiConfig) -> Result<Arc<dyn PizzaService>> {
    match config.storage.backend {
        StorageBackend::InMemory => {
            tracing::info!("using in-memory storage");
            Ok(Arc::new(InMemoryPizzaService::new()))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            use pizza_api::storage::{PostgresPizzaService, postgres::ensure_schema};

            let url = config
                .storage
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("storage.database_url is required for postgres"))?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await?;
            ensure_schema(&pool).await?;

            tracing::info!("using PostgreSQL storage");
            Ok(Arc::new(PostgresPizzaService::new(pool)))
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => Err(anyhow::anyhow!(
            "the postgres backend requires building with `--features postgres`"
        )),
    }
}

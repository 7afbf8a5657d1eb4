//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::ApiConfig;
use crate::core::service::PizzaService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the pizza HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ApiConfig::from_yaml_file("pizza-api.yaml")?)
///     .with_service(InMemoryPizzaService::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ApiConfig,
    service: Option<Arc<dyn PizzaService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            service: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the pizza service (required)
    pub fn with_service(mut self, service: impl PizzaService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set an already shared pizza service (required)
    pub fn with_service_arc(mut self, service: Arc<dyn PizzaService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Add custom routes to the server
    ///
    /// They are merged at the root, outside the route prefix.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ops = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_service(service)
    ///     .with_custom_routes(ops)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let service = self
            .service
            .take()
            .ok_or_else(|| anyhow::anyhow!("PizzaService is required. Call .with_service()"))?;

        ServerHost::new(self.config.clone(), service)
    }

    /// Build the final REST router, with request tracing
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        let app = RestExposure::build_router(host, custom_routes)?;

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured host and port
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let prefix = self.config.server.route_prefix.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, prefix = %prefix, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

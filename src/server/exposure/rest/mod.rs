//! REST API exposure
//!
//! This module provides REST-specific routing and handlers.
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

pub mod handlers;
pub mod hydra;

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use handlers::PizzaState;
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all application state
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes (never prefixed)
    /// - Pizza routes under the configured route prefix
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let pizza_routes = Self::pizza_routes(PizzaState::from_host(&host));
        let prefix = host.config.server.route_prefix.as_str();

        let mut app = Self::health_routes();
        app = if prefix.is_empty() {
            app.merge(pizza_routes)
        } else {
            app.nest(prefix, pizza_routes)
        };

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    fn pizza_routes(state: PizzaState) -> Router {
        Router::new()
            .route(
                "/pizzas",
                get(handlers::list_pizzas).post(handlers::create_pizza),
            )
            .route(
                "/pizzas/{id}",
                get(handlers::get_pizza)
                    .patch(handlers::patch_pizza)
                    .delete(handlers::delete_pizza)
                    .put(handlers::replace_pizza),
            )
            .with_state(state)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "pizza-api"
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::storage::InMemoryPizzaService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router(prefix: &str) -> Router {
        let mut config = ApiConfig::default();
        config.server.route_prefix = prefix.to_string();
        let host = ServerHost::new(config, Arc::new(InMemoryPizzaService::new())).unwrap();
        RestExposure::build_router(Arc::new(host), vec![]).unwrap()
    }

    async fn status(app: Router, method: &str, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_routes_are_not_prefixed() {
        assert_eq!(status(router("/api"), "GET", "/health").await, StatusCode::OK);
        assert_eq!(status(router("/api"), "GET", "/healthz").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pizza_routes_are_prefixed() {
        assert_eq!(status(router("/api"), "GET", "/api/pizzas").await, StatusCode::OK);
        assert_eq!(status(router("/api"), "GET", "/pizzas").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_prefix_mounts_at_root() {
        assert_eq!(status(router(""), "GET", "/pizzas").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_is_refused_without_lookup() {
        assert_eq!(
            status(router("/api"), "PUT", "/api/pizzas/12345").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let mut config = ApiConfig::default();
        config.server.route_prefix = "/api".to_string();
        let host = ServerHost::new(config, Arc::new(InMemoryPizzaService::new())).unwrap();
        let custom = Router::new().route("/version", get(|| async { "0.1.0" }));
        let app = RestExposure::build_router(Arc::new(host), vec![custom]).unwrap();

        assert_eq!(status(app, "GET", "/version").await, StatusCode::OK);
    }
}

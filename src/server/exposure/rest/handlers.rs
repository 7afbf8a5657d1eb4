//! HTTP handlers for the pizza resource

use axum::{
    extract::{OriginalUri, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use super::hydra::{Iris, PizzaCollection, PizzaResource, respond};
use crate::core::entity::{Pizza, PizzaWrite};
use crate::core::error::{ApiError, ApiResult, EntityError, RequestError};
use crate::core::extractors::{JsonBody, MergePatch, PizzaId, QueryString};
use crate::core::media;
use crate::core::query::{PageRequest, PaginationMeta, QueryParams};
use crate::core::service::PizzaService;
use crate::core::validation;
use crate::server::host::ServerHost;

/// Methods served on a single pizza
pub const ITEM_ALLOW: &str = "GET, PATCH, DELETE";

/// Application state shared across handlers
#[derive(Clone)]
pub struct PizzaState {
    pub service: Arc<dyn PizzaService>,
    pub iris: Iris,

    /// Page size of the collection
    pub items_per_page: usize,
}

impl PizzaState {
    pub fn from_host(host: &ServerHost) -> Self {
        Self {
            service: host.service.clone(),
            iris: Iris::new(host.config.server.route_prefix.clone()),
            items_per_page: host.config.pizza_items_per_page(),
        }
    }

    async fn find(&self, id: i64) -> ApiResult<Pizza> {
        self.service
            .get(id)
            .await?
            .ok_or_else(|| EntityError::not_found("Pizza", id).into())
    }
}

fn check(pizza: &Pizza) -> ApiResult<()> {
    validation::validate(pizza).map_err(|violations| {
        tracing::warn!(violations = %violations.detail(), "rejected pizza write");
        ApiError::from(violations)
    })
}

/// `GET /pizzas`
pub async fn list_pizzas(
    State(state): State<PizzaState>,
    QueryString(params): QueryString<QueryParams>,
) -> ApiResult<Response> {
    let request = PageRequest::new(params.page()?, state.items_per_page);
    let filter = params.filter();

    let page = state.service.list(&filter, &request).await?;
    let meta = PaginationMeta::from_request(&request, page.total);

    tracing::debug!(
        page = meta.page,
        total = meta.total,
        name = ?filter.name(),
        "listed pizzas"
    );

    let body = PizzaCollection::new(&page.items, &meta, filter.name(), &state.iris);
    Ok(respond(StatusCode::OK, media::JSON_LD, body))
}

/// `GET /pizzas/{id}`
pub async fn get_pizza(
    State(state): State<PizzaState>,
    PizzaId(id): PizzaId,
) -> ApiResult<Response> {
    let pizza = state.find(id).await?;
    Ok(respond(
        StatusCode::OK,
        media::JSON_LD,
        PizzaResource::document(&pizza, &state.iris),
    ))
}

/// `POST /pizzas`
pub async fn create_pizza(
    State(state): State<PizzaState>,
    JsonBody(write): JsonBody<PizzaWrite>,
) -> ApiResult<Response> {
    let special = write.special.ok_or_else(|| RequestError::InvalidBody {
        message: "special: This value should be of type bool.".to_string(),
    })?;

    let now = Utc::now();
    let mut pizza = Pizza::new(special, now);
    pizza.apply(write, now);
    check(&pizza)?;

    let pizza = state.service.create(pizza).await?;
    tracing::debug!(id = ?pizza.id(), "created pizza");

    Ok(respond(
        StatusCode::CREATED,
        media::JSON,
        PizzaResource::document(&pizza, &state.iris),
    ))
}

/// `PATCH /pizzas/{id}` with a merge-patch body
pub async fn patch_pizza(
    State(state): State<PizzaState>,
    PizzaId(id): PizzaId,
    MergePatch(write): MergePatch<PizzaWrite>,
) -> ApiResult<Response> {
    let mut pizza = state.find(id).await?;
    pizza.apply(write, Utc::now());
    check(&pizza)?;

    let pizza = state.service.update(&pizza).await?;
    tracing::debug!(id, "updated pizza");

    Ok(respond(
        StatusCode::OK,
        media::JSON_LD,
        PizzaResource::document(&pizza, &state.iris),
    ))
}

/// `DELETE /pizzas/{id}`
pub async fn delete_pizza(
    State(state): State<PizzaState>,
    PizzaId(id): PizzaId,
) -> ApiResult<StatusCode> {
    if !state.service.delete(id).await? {
        return Err(EntityError::not_found("Pizza", id).into());
    }

    tracing::debug!(id, "deleted pizza");
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /pizzas/{id}`: full replacement is not offered
///
/// Neither the body nor the identifier is looked at.
pub async fn replace_pizza(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    ApiError::from(RequestError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
        allow: ITEM_ALLOW,
    })
    .into_response()
}

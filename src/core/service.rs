//! Service trait for pizza persistence

use crate::core::entity::Pizza;
use crate::core::query::{Page, PageRequest, PizzaFilter};
use anyhow::Result;
use async_trait::async_trait;

/// Storage-agnostic pizza operations
///
/// Implementations own identifier assignment and ordering. The HTTP layer
/// never talks to a backend directly.
#[async_trait]
pub trait PizzaService: Send + Sync {
    /// Persist a new pizza and return it with its assigned `id`
    async fn create(&self, pizza: Pizza) -> Result<Pizza>;

    /// Get a pizza by ID
    async fn get(&self, id: i64) -> Result<Option<Pizza>>;

    /// One page of pizzas matching `filter`, ordered by ascending `id`
    async fn list(&self, filter: &PizzaFilter, page: &PageRequest) -> Result<Page<Pizza>>;

    /// Write the mutable fields of an already stored pizza
    ///
    /// `special` and `created_at` are never written by an update.
    async fn update(&self, pizza: &Pizza) -> Result<Pizza>;

    /// Delete a pizza, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;
}

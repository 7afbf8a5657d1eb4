//! In-memory implementation of PizzaService for testing and development

use crate::core::entity::Pizza;
use crate::core::query::{Page, PageRequest, PizzaFilter};
use crate::core::service::PizzaService;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Pizza>,
    last_id: i64,
}

/// In-memory pizza service implementation
///
/// Rows are kept ordered by `id`. Identifiers come from a counter and are
/// never reused, even after a delete.
#[derive(Clone, Default)]
pub struct InMemoryPizzaService {
    table: Arc<RwLock<Table>>,
}

impl InMemoryPizzaService {
    /// Create an empty in-memory pizza service
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PizzaService for InMemoryPizzaService {
    async fn create(&self, pizza: Pizza) -> Result<Pizza> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        table.last_id += 1;
        let id = table.last_id;
        let pizza = pizza.with_id(id);
        table.rows.insert(id, pizza.clone());

        Ok(pizza)
    }

    async fn get(&self, id: i64) -> Result<Option<Pizza>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self, filter: &PizzaFilter, page: &PageRequest) -> Result<Page<Pizza>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let matching: Vec<&Pizza> = table.rows.values().filter(|p| filter.matches(p)).collect();
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(page.offset())
            .take(page.items_per_page())
            .cloned()
            .collect();

        Ok(Page { items, total })
    }

    async fn update(&self, pizza: &Pizza) -> Result<Pizza> {
        let id = pizza
            .id()
            .ok_or_else(|| anyhow!("Cannot update a pizza without id"))?;

        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Pizza {} not found", id))?;

        stored.name = pizza.name.clone();
        stored.ingredients = pizza.ingredients.clone();
        stored.oven_time_in_seconds = pizza.oven_time_in_seconds;
        stored.updated_at = pizza.updated_at;

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.remove(&id).is_some())
    }
}

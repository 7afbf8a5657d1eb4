//! Query parameters, filtering and pagination

use crate::core::entity::Pizza;
use crate::core::error::RequestError;
use serde::Deserialize;

/// Query parameters accepted by the pizza collection
///
/// Kept as raw strings so malformed values become a proper 400 response
/// instead of an extractor rejection.
///
/// # Example
/// ```text
/// GET /api/pizzas?page=2
/// GET /api/pizzas?name=Marg&page=1
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Partial, case-sensitive match on the pizza name
    pub name: Option<String>,
}

impl QueryParams {
    /// Requested page, defaulting to 1
    pub fn page(&self) -> Result<usize, RequestError> {
        let Some(raw) = self.page.as_deref() else {
            return Ok(1);
        };

        match raw.trim().parse::<i64>() {
            Ok(page) if page >= 1 => Ok(page as usize),
            Ok(_) => Err(RequestError::InvalidPage {
                message: "Page should not be less than 1".to_string(),
            }),
            Err(_) => Err(RequestError::InvalidPage {
                message: format!("Invalid page number '{}'", raw),
            }),
        }
    }

    pub fn filter(&self) -> PizzaFilter {
        PizzaFilter::by_name(self.name.clone())
    }
}

/// Filter applied to the pizza collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PizzaFilter {
    name: Option<String>,
}

impl PizzaFilter {
    /// No filtering
    pub fn all() -> Self {
        Self::default()
    }

    /// Substring filter on `name`; an empty needle filters nothing
    pub fn by_name(name: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn matches(&self, pizza: &Pizza) -> bool {
        match &self.name {
            Some(needle) => pizza.name().is_some_and(|name| name.contains(needle.as_str())),
            None => true,
        }
    }
}

/// A page of the collection to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    items_per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, items_per_page: usize) -> Self {
        Self {
            page: page.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.items_per_page)
    }
}

/// One page of results together with the unpaginated total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Last page number, never below 1
    pub last_page: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let last_page = total.div_ceil(limit).max(1);

        Self {
            page,
            limit,
            total,
            last_page,
            has_next: page < last_page,
            has_prev: page > 1,
        }
    }

    pub fn from_request(request: &PageRequest, total: usize) -> Self {
        Self::new(request.page(), request.items_per_page(), total)
    }
}

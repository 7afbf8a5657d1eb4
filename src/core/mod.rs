//! Core module containing the pizza model, its rules and the service seam

pub mod entity;
pub mod error;
pub mod extractors;
pub mod media;
pub mod query;
pub mod service;
pub mod timestamps;
pub mod validation;

pub use entity::{Pizza, PizzaWrite};
pub use error::{ApiError, ApiResult};
pub use query::{Page, PageRequest, PaginationMeta, PizzaFilter, QueryParams};
pub use service::PizzaService;
pub use validation::{ConstraintViolation, ConstraintViolationList};

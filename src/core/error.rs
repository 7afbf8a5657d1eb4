//! Typed error handling for the pizza API
//!
//! Every failure that reaches the HTTP boundary is an [`ApiError`]. Each
//! category knows its status code and a stable error code, and the whole
//! hierarchy renders as an `application/problem+json` body.
//!
//! # Error Categories
//!
//! - [`EntityError`]: the addressed pizza does not exist
//! - [`ValidationError`]: the record broke one or more field rules
//! - [`RequestError`]: the request itself is unusable (method, body, media type)
//! - [`StorageError`]: the store failed
//!
//! # Example
//!
//! ```rust,ignore
//! let pizza = service
//!     .get(id)
//!     .await?
//!     .ok_or_else(|| EntityError::not_found("Pizza", id))?;
//! ```

use crate::core::media;
use crate::core::validation::ConstraintViolationList;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the API
#[derive(Debug)]
pub enum ApiError {
    /// Entity lookups
    Entity(EntityError),

    /// Field rule violations
    Validation(ValidationError),

    /// Malformed or unsupported requests
    Request(RequestError),

    /// Storage backend errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Problem details body returned for every error
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub title: &'static str,
    pub detail: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<ConstraintViolationList>,
}

pub const PROBLEM_TITLE: &str = "An error occurred";

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Request(e) => e.status_code(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Request(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to a problem details body
    pub fn to_problem(&self) -> ProblemDetails {
        match self {
            ApiError::Validation(ValidationError::Violations(violations)) => ProblemDetails {
                kind: Some("ConstraintViolationList"),
                title: PROBLEM_TITLE,
                detail: violations.detail(),
                status: self.status_code().as_u16(),
                violations: Some(violations.clone()),
            },
            // Store internals stay in the logs
            ApiError::Storage(_) | ApiError::Internal(_) => ProblemDetails {
                kind: None,
                title: PROBLEM_TITLE,
                detail: "Internal Server Error".to_string(),
                status: self.status_code().as_u16(),
                violations: None,
            },
            _ => ProblemDetails {
                kind: None,
                title: PROBLEM_TITLE,
                detail: self.to_string(),
                status: self.status_code().as_u16(),
                violations: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let mut response = (status, Json(self.to_problem())).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(media::PROBLEM_JSON),
        );
        if let ApiError::Request(RequestError::MethodNotAllowed { allow, .. }) = &self {
            headers.insert(header::ALLOW, HeaderValue::from_static(*allow));
        }
        response
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound { resource: String, id: String },
}

impl EntityError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        EntityError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to field rules
#[derive(Debug)]
pub enum ValidationError {
    /// One or more violated rules, in declaration order
    Violations(ConstraintViolationList),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Violations(violations) => {
                let msgs: Vec<String> = violations.iter().map(ToString::to_string).collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<ConstraintViolationList> for ApiError {
    fn from(violations: ConstraintViolationList) -> Self {
        ApiError::Validation(ValidationError::Violations(violations))
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Body could not be read or deserialized
    InvalidBody { message: String },

    /// Path identifier is not a pizza id
    InvalidIdentifier { value: String },

    /// `page` query parameter is unusable
    InvalidPage { message: String },

    /// Query string could not be deserialized
    InvalidQuery { message: String },

    /// Body sent with a media type the operation does not accept
    UnsupportedMediaType {
        content_type: String,
        expected: String,
    },

    /// Method not allowed
    MethodNotAllowed {
        method: String,
        path: String,
        allow: &'static str,
    },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::InvalidIdentifier { value } => {
                write!(f, "No resource matches identifier '{}'", value)
            }
            RequestError::InvalidPage { message } => write!(f, "{}", message),
            RequestError::InvalidQuery { message } => {
                write!(f, "Invalid query string: {}", message)
            }
            RequestError::UnsupportedMediaType {
                content_type,
                expected,
            } => {
                write!(
                    f,
                    "The content-type \"{}\" is not supported. Supported MIME types are \"{}\".",
                    content_type, expected
                )
            }
            RequestError::MethodNotAllowed {
                method,
                path,
                allow,
            } => {
                write!(
                    f,
                    "No route found for \"{} {}\": Method Not Allowed (Allow: {})",
                    method, path, allow
                )
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidIdentifier { .. } => StatusCode::NOT_FOUND,
            RequestError::InvalidPage { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            RequestError::InvalidPage { .. } => "INVALID_PAGE",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A store operation failed
    Backend { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend { message } => {
                write!(f, "Storage operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

/// Store implementations report through `anyhow`
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(StorageError::Backend {
            message: format!("{:#}", err),
        })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for request handling
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================

//! Axum extractors for pizza requests
//!
//! This module provides HTTP extractors that:
//! - Check the body media type before anything is parsed
//! - Deserialize JSON bodies, turning failures into problem responses
//! - Deserialize query strings the same way
//! - Parse the `{id}` path segment

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::core::error::{ApiError, RequestError};
use crate::core::media;

/// JSON body accepted by creation (`application/json` or `application/ld+json`)
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_pizza(JsonBody(write): JsonBody<PizzaWrite>) -> ApiResult<Response> {
///     // write is deserialized, its media type was checked
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// JSON merge-patch body (`application/merge-patch+json` only)
#[derive(Debug, Clone)]
pub struct MergePatch<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        require_media_type(&req, media::WRITE_FORMATS)?;
        read_json(req, state).await.map(JsonBody)
    }
}

impl<S, T> FromRequest<S> for MergePatch<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        require_media_type(&req, &[media::MERGE_PATCH_JSON])?;
        read_json(req, state).await.map(MergePatch)
    }
}

fn require_media_type(req: &Request, accepted: &[&str]) -> Result<(), RequestError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if accepted.contains(&media::essence(content_type).as_str()) {
        Ok(())
    } else {
        Err(RequestError::UnsupportedMediaType {
            content_type: content_type.to_string(),
            expected: accepted.join("\", \""),
        })
    }
}

async fn read_json<S, T>(req: Request, state: &S) -> Result<T, ApiError>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| RequestError::InvalidBody {
            message: rejection.body_text(),
        })?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Query string whose rejection is a problem response like any other error
#[derive(Debug, Clone)]
pub struct QueryString<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryString<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::InvalidQuery {
                message: rejection.body_text(),
            })?;

        Ok(QueryString(value))
    }
}

/// Pizza identifier taken from the `{id}` path segment
///
/// A segment that is not an integer addresses nothing and is rejected as
/// not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PizzaId(pub i64);

impl<S> FromRequestParts<S> for PizzaId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Internal(rejection.body_text()))?;

        Ok(PizzaId(parse_id(&raw)?))
    }
}

pub fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse::<i64>()
        .map_err(|_| RequestError::InvalidIdentifier {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/pizzas");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(
            parse_id("abc"),
            Err(RequestError::InvalidIdentifier { .. })
        ));
        assert!(parse_id("").is_err());
    }

    #[tokio::test]
    async fn test_json_body_accepts_json_and_json_ld() {
        for content_type in ["application/json", "application/ld+json; charset=utf-8"] {
            let JsonBody(payload) =
                JsonBody::<Payload>::from_request(request(Some(content_type), r#"{"name":"x"}"#), &())
                    .await
                    .unwrap();
            assert_eq!(payload.name, "x");
        }
    }

    #[tokio::test]
    async fn test_json_body_rejects_other_media_types() {
        let err = JsonBody::<Payload>::from_request(request(Some("text/plain"), "{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = JsonBody::<Payload>::from_request(request(None, "{}"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_merge_patch_requires_its_media_type() {
        let err = MergePatch::<Payload>::from_request(
            request(Some("application/json"), r#"{"name":"x"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let MergePatch(payload) = MergePatch::<Payload>::from_request(
            request(Some("application/merge-patch+json"), r#"{"name":"y"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(payload.name, "y");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Params {
        page: Option<String>,
    }

    async fn query(uri: &str) -> Result<QueryString<Params>, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryString::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_string_is_deserialized() {
        let QueryString(params) = query("/pizzas?page=2").await.unwrap();
        assert_eq!(params.page.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_duplicate_query_parameter_is_a_bad_request() {
        let err = query("/pizzas?page=1&page=2").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_bad_request() {
        let err = JsonBody::<Payload>::from_request(request(Some("application/json"), "{nope"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

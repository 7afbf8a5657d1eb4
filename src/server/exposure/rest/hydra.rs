//! JSON-LD representations using the Hydra vocabulary
//!
//! Items are the plain pizza fields plus `@id`/`@type` (and `@context` at
//! the top level). Collections wrap a page of items with the total count,
//! page navigation links and the search template.

use crate::core::entity::Pizza;
use crate::core::query::PaginationMeta;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const RESOURCE_TYPE: &str = "Pizza";

/// IRIs of the pizza resource under a route prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iris {
    prefix: String,
}

impl Iris {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn collection(&self) -> String {
        format!("{}/pizzas", self.prefix)
    }

    pub fn item(&self, id: i64) -> String {
        format!("{}/pizzas/{}", self.prefix, id)
    }

    pub fn context(&self) -> String {
        format!("{}/contexts/{}", self.prefix, RESOURCE_TYPE)
    }

    /// Collection page link; an active name filter is carried along
    pub fn page(&self, page: usize, name: Option<&str>) -> String {
        match name {
            Some(name) => format!(
                "{}?name={}&page={}",
                self.collection(),
                encode_query_value(name),
                page
            ),
            None => format!("{}?page={}", self.collection(), page),
        }
    }

    pub fn search_template(&self) -> String {
        format!("{}{{?name}}", self.collection())
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// A pizza with its JSON-LD identity
#[derive(Debug, Serialize)]
pub struct PizzaResource<'a> {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: &'static str,

    #[serde(flatten)]
    pub pizza: &'a Pizza,
}

impl<'a> PizzaResource<'a> {
    /// Top-level item document
    pub fn document(pizza: &'a Pizza, iris: &Iris) -> Self {
        Self {
            context: Some(iris.context()),
            ..Self::member(pizza, iris)
        }
    }

    /// Item embedded in a collection
    pub fn member(pizza: &'a Pizza, iris: &Iris) -> Self {
        Self {
            context: None,
            id: pizza
                .id()
                .map(|id| iris.item(id))
                .unwrap_or_else(|| iris.collection()),
            kind: RESOURCE_TYPE,
            pizza,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PartialCollectionView {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: &'static str,

    #[serde(rename = "hydra:first")]
    pub first: String,

    #[serde(rename = "hydra:last")]
    pub last: String,

    #[serde(rename = "hydra:previous", skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    #[serde(rename = "hydra:next", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PartialCollectionView {
    pub fn new(meta: &PaginationMeta, name: Option<&str>, iris: &Iris) -> Self {
        Self {
            id: iris.page(meta.page, name),
            kind: "hydra:PartialCollectionView",
            first: iris.page(1, name),
            last: iris.page(meta.last_page, name),
            previous: meta.has_prev.then(|| iris.page(meta.page - 1, name)),
            next: meta.has_next.then(|| iris.page(meta.page + 1, name)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IriTemplateMapping {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub variable: &'static str,
    pub property: &'static str,
    pub required: bool,
}

#[derive(Debug, Serialize)]
pub struct IriTemplate {
    #[serde(rename = "@type")]
    pub kind: &'static str,

    #[serde(rename = "hydra:template")]
    pub template: String,

    #[serde(rename = "hydra:variableRepresentation")]
    pub variable_representation: &'static str,

    #[serde(rename = "hydra:mapping")]
    pub mapping: Vec<IriTemplateMapping>,
}

impl IriTemplate {
    /// Search template advertising the `name` filter
    pub fn name_search(iris: &Iris) -> Self {
        Self {
            kind: "hydra:IriTemplate",
            template: iris.search_template(),
            variable_representation: "BasicRepresentation",
            mapping: vec![IriTemplateMapping {
                kind: "IriTemplateMapping",
                variable: "name",
                property: "name",
                required: false,
            }],
        }
    }
}

/// One page of the pizza collection
#[derive(Debug, Serialize)]
pub struct PizzaCollection<'a> {
    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: &'static str,

    #[serde(rename = "hydra:totalItems")]
    pub total_items: usize,

    #[serde(rename = "hydra:member")]
    pub member: Vec<PizzaResource<'a>>,

    #[serde(rename = "hydra:view")]
    pub view: PartialCollectionView,

    #[serde(rename = "hydra:search")]
    pub search: IriTemplate,
}

impl<'a> PizzaCollection<'a> {
    pub fn new(
        pizzas: &'a [Pizza],
        meta: &PaginationMeta,
        name: Option<&str>,
        iris: &Iris,
    ) -> Self {
        Self {
            context: iris.context(),
            id: iris.collection(),
            kind: "hydra:Collection",
            total_items: meta.total,
            member: pizzas
                .iter()
                .map(|pizza| PizzaResource::member(pizza, iris))
                .collect(),
            view: PartialCollectionView::new(meta, name, iris),
            search: IriTemplate::name_search(iris),
        }
    }
}

/// JSON body with an explicit media type
pub fn respond<T: Serialize>(status: StatusCode, content_type: &'static str, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PizzaWrite;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn iris() -> Iris {
        Iris::new("/api")
    }

    fn carbonara() -> Pizza {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut pizza = Pizza::new(true, created).with_id(9);
        pizza.apply(
            PizzaWrite::new()
                .name("Carbonara")
                .ingredients(["Cream", "Bacon"])
                .oven_time_in_seconds(Some(10000)),
            created,
        );
        pizza
    }

    #[test]
    fn test_iris() {
        let iris = iris();
        assert_eq!(iris.collection(), "/api/pizzas");
        assert_eq!(iris.item(3), "/api/pizzas/3");
        assert_eq!(iris.context(), "/api/contexts/Pizza");
        assert_eq!(iris.search_template(), "/api/pizzas{?name}");
        assert_eq!(Iris::new("").collection(), "/pizzas");
    }

    #[test]
    fn test_page_links_carry_encoded_filter() {
        let iris = iris();
        assert_eq!(iris.page(2, None), "/api/pizzas?page=2");
        assert_eq!(iris.page(2, Some("Carb")), "/api/pizzas?name=Carb&page=2");
        assert_eq!(
            iris.page(1, Some("Quattro & Co")),
            "/api/pizzas?name=Quattro%20%26%20Co&page=1"
        );
    }

    #[test]
    fn test_item_document() {
        let pizza = carbonara();
        let value = serde_json::to_value(PizzaResource::document(&pizza, &iris())).unwrap();

        assert_eq!(
            value,
            json!({
                "@context": "/api/contexts/Pizza",
                "@id": "/api/pizzas/9",
                "@type": "Pizza",
                "id": 9,
                "name": "Carbonara",
                "ingredients": ["Cream", "Bacon"],
                "ovenTimeInSeconds": 10000,
                "createdAt": "2024-01-01T10:00:00+00:00",
                "updatedAt": null,
                "special": true
            })
        );
    }

    #[test]
    fn test_member_has_no_context() {
        let pizza = carbonara();
        let value = serde_json::to_value(PizzaResource::member(&pizza, &iris())).unwrap();
        assert!(value.get("@context").is_none());
        assert_eq!(value["@id"], "/api/pizzas/9");
    }

    #[test]
    fn test_first_page_view() {
        let meta = PaginationMeta::new(1, 5, 100);
        let value = serde_json::to_value(PartialCollectionView::new(&meta, None, &iris())).unwrap();

        assert_eq!(
            value,
            json!({
                "@id": "/api/pizzas?page=1",
                "@type": "hydra:PartialCollectionView",
                "hydra:first": "/api/pizzas?page=1",
                "hydra:last": "/api/pizzas?page=20",
                "hydra:next": "/api/pizzas?page=2"
            })
        );
    }

    #[test]
    fn test_middle_page_view_links_both_ways() {
        let meta = PaginationMeta::new(4, 5, 100);
        let view = PartialCollectionView::new(&meta, Some("Marg"), &iris());

        assert_eq!(view.previous.as_deref(), Some("/api/pizzas?name=Marg&page=3"));
        assert_eq!(view.next.as_deref(), Some("/api/pizzas?name=Marg&page=5"));
    }

    #[test]
    fn test_empty_collection() {
        let meta = PaginationMeta::new(1, 5, 0);
        let value = serde_json::to_value(PizzaCollection::new(&[], &meta, None, &iris())).unwrap();

        assert_eq!(value["hydra:totalItems"], 0);
        assert_eq!(value["hydra:member"], json!([]));
        assert_eq!(value["hydra:view"]["hydra:last"], "/api/pizzas?page=1");
        assert!(value["hydra:view"].get("hydra:next").is_none());
        assert_eq!(
            value["hydra:search"]["hydra:mapping"][0],
            json!({"@type": "IriTemplateMapping", "variable": "name", "property": "name", "required": false})
        );
    }
}

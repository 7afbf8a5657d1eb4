//! The pizza record and its write field set

use crate::core::timestamps;
use crate::core::validation::rules::{ingredient_count, not_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// A pizza as stored and served by the API.
///
/// Only `name`, `ingredients` and `oven_time_in_seconds` have mutators.
/// `special` and `created_at` are fixed at construction and `id` is assigned
/// by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    pub(crate) id: Option<i64>,

    #[validate(
        required(message = "This value should not be blank."),
        custom(function = "not_blank"),
        length(
            max = 48,
            message = "This value is too long. It should have 48 characters or less."
        )
    )]
    pub(crate) name: Option<String>,

    #[validate(
        required(message = "This value should not be null."),
        custom(function = "ingredient_count")
    )]
    pub(crate) ingredients: Option<Vec<String>>,

    pub(crate) oven_time_in_seconds: Option<i64>,

    #[serde(serialize_with = "iso8601::serialize")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(serialize_with = "iso8601::serialize_option")]
    pub(crate) updated_at: Option<DateTime<Utc>>,

    pub(crate) special: bool,
}

impl Pizza {
    /// Create an unsaved pizza stamped as created at `now`.
    pub fn new(special: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: None,
            ingredients: Some(Vec::new()),
            oven_time_in_seconds: None,
            created_at: now,
            updated_at: None,
            special,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ingredients(&self) -> Option<&[String]> {
        self.ingredients.as_deref()
    }

    pub fn oven_time_in_seconds(&self) -> Option<i64> {
        self.oven_time_in_seconds
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn special(&self) -> bool {
        self.special
    }

    pub fn set_name(&mut self, name: Option<String>, now: DateTime<Utc>) -> &mut Self {
        self.touch(now);
        self.name = name;
        self
    }

    pub fn set_ingredients(
        &mut self,
        ingredients: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> &mut Self {
        self.touch(now);
        self.ingredients = ingredients;
        self
    }

    pub fn set_oven_time_in_seconds(
        &mut self,
        oven_time_in_seconds: Option<i64>,
        now: DateTime<Utc>,
    ) -> &mut Self {
        self.touch(now);
        self.oven_time_in_seconds = oven_time_in_seconds;
        self
    }

    /// Apply every field present in `write` through its mutator.
    ///
    /// Absent fields are left untouched. `special` has no mutator and is
    /// ignored here; it only feeds [`Pizza::new`] on creation.
    pub fn apply(&mut self, write: PizzaWrite, now: DateTime<Utc>) -> &mut Self {
        if let Some(name) = write.name {
            self.set_name(name, now);
        }
        if let Some(ingredients) = write.ingredients {
            self.set_ingredients(ingredients, now);
        }
        if let Some(oven_time_in_seconds) = write.oven_time_in_seconds {
            self.set_oven_time_in_seconds(oven_time_in_seconds, now);
        }
        self
    }

    /// Same record with the store-assigned identifier.
    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        if let Some(updated_at) = timestamps::touch(self.created_at, now) {
            self.updated_at = Some(updated_at);
        }
    }
}

/// Client-writable pizza fields.
///
/// Each optional field has three states: absent (`None`), explicitly null
/// (`Some(None)`) and set (`Some(Some(value))`). This is what merge-patch
/// needs to tell "leave alone" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaWrite {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    pub ingredients: Option<Option<Vec<String>>>,

    #[serde(default, deserialize_with = "present")]
    pub oven_time_in_seconds: Option<Option<i64>>,

    #[serde(default)]
    pub special: Option<bool>,
}

impl PizzaWrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = Some(Some(ingredients.into_iter().map(Into::into).collect()));
        self
    }

    pub fn oven_time_in_seconds(mut self, seconds: Option<i64>) -> Self {
        self.oven_time_in_seconds = Some(seconds);
        self
    }

    pub fn special(mut self, special: bool) -> Self {
        self.special = Some(special);
        self
    }
}

/// Marks a key that appeared in the body, even with a `null` value.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Timestamps on the wire: RFC 3339 with second precision and a numeric offset.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn serialize_option<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_new_pizza_defaults() {
        let pizza = Pizza::new(true, created());

        assert_eq!(pizza.id(), None);
        assert_eq!(pizza.name(), None);
        assert_eq!(pizza.ingredients(), Some(&[][..]));
        assert_eq!(pizza.oven_time_in_seconds(), None);
        assert_eq!(pizza.created_at(), created());
        assert_eq!(pizza.updated_at(), None);
        assert!(pizza.special());
    }

    #[test]
    fn test_mutation_in_creation_second_keeps_updated_at_null() {
        let mut pizza = Pizza::new(false, created());
        pizza.set_name(Some("Diavola".into()), created() + Duration::milliseconds(400));

        assert_eq!(pizza.name(), Some("Diavola"));
        assert_eq!(pizza.updated_at(), None);
    }

    #[test]
    fn test_mutation_after_creation_second_stamps_updated_at() {
        let mut pizza = Pizza::new(false, created());
        let later = created() + Duration::minutes(3);
        pizza.set_oven_time_in_seconds(Some(600), later);

        assert_eq!(pizza.updated_at(), Some(later));
    }

    #[test]
    fn test_unchanged_value_still_stamps_updated_at() {
        let mut pizza = Pizza::new(false, created());
        pizza.set_name(Some("Funghi".into()), created());
        let later = created() + Duration::seconds(5);
        pizza.set_name(Some("Funghi".into()), later);

        assert_eq!(pizza.updated_at(), Some(later));
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut pizza = Pizza::new(true, created());
        pizza.apply(
            PizzaWrite::new()
                .name("Quattro Formaggi")
                .ingredients(["Mozzarella", "Gorgonzola", "Parmesan", "Fontina"])
                .oven_time_in_seconds(Some(540)),
            created(),
        );

        let later = created() + Duration::hours(1);
        pizza.apply(PizzaWrite::new().name("Cinque Formaggi"), later);

        assert_eq!(pizza.name(), Some("Cinque Formaggi"));
        assert_eq!(pizza.ingredients().map(<[String]>::len), Some(4));
        assert_eq!(pizza.oven_time_in_seconds(), Some(540));
        assert_eq!(pizza.updated_at(), Some(later));
    }

    #[test]
    fn test_apply_empty_write_does_not_touch() {
        let mut pizza = Pizza::new(true, created());
        pizza.apply(PizzaWrite::new(), created() + Duration::hours(2));

        assert_eq!(pizza.updated_at(), None);
    }

    #[test]
    fn test_apply_ignores_special() {
        let mut pizza = Pizza::new(true, created());
        pizza.apply(PizzaWrite::new().special(false), created() + Duration::hours(1));

        assert!(pizza.special());
    }

    #[test]
    fn test_write_distinguishes_absent_from_null() {
        let write: PizzaWrite =
            serde_json::from_str(r#"{"ovenTimeInSeconds": null, "name": "Marinara"}"#).unwrap();

        assert_eq!(write.name, Some(Some("Marinara".to_string())));
        assert_eq!(write.oven_time_in_seconds, Some(None));
        assert_eq!(write.ingredients, None);
        assert_eq!(write.special, None);
    }

    #[test]
    fn test_write_ignores_read_only_keys() {
        let write: PizzaWrite = serde_json::from_str(
            r#"{"id": 7, "createdAt": "2020-01-01T00:00:00+00:00", "special": true}"#,
        )
        .unwrap();

        assert_eq!(write, PizzaWrite::new().special(true));
    }

    #[test]
    fn test_write_rejects_wrong_types() {
        assert!(serde_json::from_str::<PizzaWrite>(r#"{"name": 12}"#).is_err());
        assert!(serde_json::from_str::<PizzaWrite>(r#"{"ingredients": "Basil"}"#).is_err());
    }

    #[test]
    fn test_serializes_camel_case_with_second_precision() {
        let mut pizza = Pizza::new(true, created() + Duration::milliseconds(123)).with_id(3);
        pizza.apply(
            PizzaWrite::new().name("Margherita").ingredients(["Tomato", "Basil"]),
            created(),
        );

        let json = serde_json::to_value(&pizza).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["ovenTimeInSeconds"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], "2024-03-01T18:00:00+00:00");
        assert_eq!(json["updatedAt"], serde_json::Value::Null);
        assert_eq!(json["ingredients"][1], "Basil");
    }
}

//! Validation of pizza records before they reach the store
//!
//! Field rules are declared on [`Pizza`] with the `validator` derive; this
//! module runs them and turns the outcome into an ordered
//! [`ConstraintViolationList`].

pub mod rules;
pub mod violations;

pub use violations::{ConstraintViolation, ConstraintViolationList};

use crate::core::entity::Pizza;
use validator::Validate;

/// Validated fields in declaration order, with their wire names.
const PIZZA_FIELDS: &[(&str, &str)] = &[("name", "name"), ("ingredients", "ingredients")];

/// Run every pizza rule; all violations are reported, not just the first.
pub fn validate(pizza: &Pizza) -> Result<(), ConstraintViolationList> {
    match pizza.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            ConstraintViolationList::from_validation_errors(&errors, PIZZA_FIELDS).into_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{NAME_TOO_LONG_MESSAGE, NOT_BLANK_MESSAGE, NOT_NULL_MESSAGE};
    use super::*;
    use crate::core::entity::PizzaWrite;
    use chrono::Utc;

    fn pizza(write: PizzaWrite) -> Pizza {
        let now = Utc::now();
        let mut pizza = Pizza::new(false, now);
        pizza.apply(write, now);
        pizza
    }

    fn messages(list: &ConstraintViolationList) -> Vec<(String, String)> {
        list.iter()
            .map(|v| (v.property_path.clone(), v.message.clone()))
            .collect()
    }

    #[test]
    fn test_valid_pizza() {
        let pizza = pizza(PizzaWrite::new().name("Margherita").ingredients(["Tomato"]));
        assert!(validate(&pizza).is_ok());
    }

    #[test]
    fn test_name_of_exactly_48_characters_is_valid() {
        let pizza = pizza(PizzaWrite::new().name("x".repeat(48)).ingredients(["Tomato"]));
        assert!(validate(&pizza).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        let pizza = pizza(PizzaWrite::new().name("é".repeat(48)).ingredients(["Tomato"]));
        assert!(validate(&pizza).is_ok());
    }

    #[test]
    fn test_missing_name_is_blank() {
        let list = validate(&pizza(PizzaWrite::new().ingredients(["Tomato"]))).unwrap_err();
        assert_eq!(
            messages(&list),
            [("name".to_string(), NOT_BLANK_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_whitespace_name_is_not_blank() {
        let pizza = pizza(PizzaWrite::new().name("   ").ingredients(["Tomato"]));
        assert!(validate(&pizza).is_ok());
    }

    #[test]
    fn test_empty_name_is_blank() {
        let list = validate(&pizza(PizzaWrite::new().name("").ingredients(["Tomato"])))
            .unwrap_err();
        assert_eq!(
            messages(&list),
            [("name".to_string(), NOT_BLANK_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_null_ingredients() {
        let mut write = PizzaWrite::new().name("Bianca");
        write.ingredients = Some(None);

        let list = validate(&pizza(write)).unwrap_err();
        assert_eq!(
            messages(&list),
            [("ingredients".to_string(), NOT_NULL_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_violations_accumulate_in_field_order() {
        let too_many: Vec<String> = (0..23).map(|i| format!("Topping {}", i)).collect();
        let write = PizzaWrite::new()
            .name("+48Chars->12345678901234567890123456789012345678901234567890")
            .ingredients(too_many);

        let list = validate(&pizza(write)).unwrap_err();
        assert_eq!(
            messages(&list),
            [
                ("name".to_string(), NAME_TOO_LONG_MESSAGE.to_string()),
                (
                    "ingredients".to_string(),
                    "You cannot specify more than 20 ingredients".to_string()
                ),
            ]
        );
        assert_eq!(
            list.detail(),
            "name: This value is too long. It should have 48 characters or less.\n\
             ingredients: You cannot specify more than 20 ingredients"
        );
    }

    #[test]
    fn test_default_ingredients_are_too_few() {
        let list = validate(&pizza(PizzaWrite::new().name("Empty"))).unwrap_err();
        assert_eq!(
            messages(&list),
            [(
                "ingredients".to_string(),
                "You cannot specify less than 1 ingredients".to_string()
            )]
        );
    }
}

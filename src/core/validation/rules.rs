//! Custom field rules used by the `Pizza` validation derive
//!
//! The built-in `validator` rules cover presence and string length; the
//! rules here cover what it has no notion of (blank strings, a count range
//! with a distinct message per bound).

use std::borrow::Cow;
use validator::ValidationError;

pub const NOT_BLANK_MESSAGE: &str = "This value should not be blank.";
pub const NOT_NULL_MESSAGE: &str = "This value should not be null.";
pub const NAME_TOO_LONG_MESSAGE: &str =
    "This value is too long. It should have 48 characters or less.";

pub const MIN_INGREDIENTS: usize = 1;
pub const MAX_INGREDIENTS: usize = 20;

const TOO_FEW_INGREDIENTS_TEMPLATE: &str = "You cannot specify less than {{ limit }} ingredients";
const TOO_MANY_INGREDIENTS_TEMPLATE: &str = "You cannot specify more than {{ limit }} ingredients";

/// Rule: string must not be empty (whitespace counts as content)
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(violation("not_blank", Cow::Borrowed(NOT_BLANK_MESSAGE)));
    }
    Ok(())
}

/// Rule: between [`MIN_INGREDIENTS`] and [`MAX_INGREDIENTS`] ingredients
pub fn ingredient_count(ingredients: &[String]) -> Result<(), ValidationError> {
    let count = ingredients.len();

    let (code, template, limit) = if count < MIN_INGREDIENTS {
        ("count_min", TOO_FEW_INGREDIENTS_TEMPLATE, MIN_INGREDIENTS)
    } else if count > MAX_INGREDIENTS {
        ("count_max", TOO_MANY_INGREDIENTS_TEMPLATE, MAX_INGREDIENTS)
    } else {
        return Ok(());
    };

    let mut err = violation(code, Cow::Owned(render_limit(template, limit)));
    err.add_param(Cow::Borrowed("limit"), &limit);
    err.add_param(Cow::Borrowed("count"), &count);
    Err(err)
}

/// Substitute the `{{ limit }}` placeholder of a message template.
pub fn render_limit(template: &str, limit: usize) -> String {
    template.replace("{{ limit }}", &limit.to_string())
}

fn violation(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message);
    err
}

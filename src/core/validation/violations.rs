//! Ordered constraint violation lists

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Rule codes in the order their violations are reported within one field.
///
/// The `validator` derive emits built-in rules before `custom` ones whatever
/// the attribute order, so the order is restored here. Unknown codes go last.
const RULE_ORDER: &[&str] = &["required", "not_blank", "length", "count_min", "count_max"];

fn rule_rank(err: &ValidationError) -> usize {
    RULE_ORDER
        .iter()
        .position(|code| *code == err.code)
        .unwrap_or(RULE_ORDER.len())
}

/// A single failed rule: which property, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    pub property_path: String,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_path, self.message)
    }
}

/// Violations in field declaration order, then rule declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstraintViolationList(Vec<ConstraintViolation>);

impl ConstraintViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `validator`'s unordered error map.
    ///
    /// `fields` lists `(struct field, property path)` pairs in declaration
    /// order. Fields missing from it are appended afterwards, sorted by name,
    /// with their struct field name as property path.
    pub fn from_validation_errors(errors: &ValidationErrors, fields: &[(&str, &str)]) -> Self {
        let mut list = Self::new();
        let all = errors.errors();

        for (field, property_path) in fields {
            if let Some(kind) = all.get(*field) {
                list.extend_from_kind(property_path, kind);
            }
        }

        let mut rest: Vec<(&str, &ValidationErrorsKind)> = all
            .iter()
            .map(|(key, kind)| (&**key, kind))
            .filter(|(key, _)| !fields.iter().any(|(field, _)| field == key))
            .collect();
        rest.sort_by_key(|(key, _)| *key);
        for (key, kind) in rest {
            list.extend_from_kind(key, kind);
        }

        list
    }

    pub fn push(&mut self, violation: ConstraintViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.0.iter()
    }

    /// `Ok` when nothing was violated.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Newline-joined `"field: message"` lines.
    pub fn detail(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extend_from_kind(&mut self, property_path: &str, kind: &ValidationErrorsKind) {
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let mut errors: Vec<&ValidationError> = errors.iter().collect();
                errors.sort_by_key(|err| rule_rank(err));
                for err in errors {
                    let message = err
                        .message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(err.code.to_string()));
                    self.push(ConstraintViolation::new(property_path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                let nested = Self::from_validation_errors(nested, &[]);
                for violation in nested {
                    self.push(ConstraintViolation::new(
                        format!("{}.{}", property_path, violation.property_path),
                        violation.message,
                    ));
                }
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let nested = Self::from_validation_errors(nested, &[]);
                    for violation in nested {
                        self.push(ConstraintViolation::new(
                            format!("{}[{}].{}", property_path, index, violation.property_path),
                            violation.message,
                        ));
                    }
                }
            }
        }
    }
}

impl fmt::Display for ConstraintViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail())
    }
}

impl IntoIterator for ConstraintViolationList {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolationList {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolationList {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

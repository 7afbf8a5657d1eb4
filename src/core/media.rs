//! Media types spoken by the API

/// Read representations (JSON-LD with Hydra vocabulary)
pub const JSON_LD: &str = "application/ld+json; charset=utf-8";

/// Creation responses
pub const JSON: &str = "application/json; charset=utf-8";

/// Error bodies
pub const PROBLEM_JSON: &str = "application/problem+json; charset=utf-8";

/// The only body format accepted by PATCH
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Body formats accepted by POST
pub const WRITE_FORMATS: &[&str] = &["application/json", "application/ld+json"];

/// Media type essence of a `Content-Type` value (parameters and case dropped).
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

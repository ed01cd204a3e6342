//! Validation Module
//!
//! Request-shape validation for every mutating endpoint. Each schema takes
//! the raw JSON body and either returns a strongly-typed input or the first
//! violation it meets, walking fields in declaration order. Nothing in here
//! touches storage, and the same input always produces the same outcome.
//!
//! # Error paths
//!
//! A violation names the offending field. Nested paths are reported
//! innermost segment first and dot-joined, so a bad `name.first` is
//! reported as `first.name` and the third preference as `2.preferences`.
//!
//! # Module Structure
//!
//! ```text
//! validation/
//! ├── mod.rs    - ValidationError and the field primitives
//! ├── user.rs   - signup, login and profile-update schemas
//! ├── blog.rs   - blog create/update, comment and id schemas
//! └── filter.rs - the `?filter=` query string
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::Preference;

/// User schemas
pub mod user;

/// Blog schemas
pub mod blog;

/// Search filter schema
pub mod filter;

pub use blog::NewBlogInput;
pub use filter::FilterQuery;
pub use user::{LoginInput, SignupInput};

/// The first schema violation found in a request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Dot-joined field path, innermost segment first
    pub path: String,
    pub message: String,
}

impl ValidationError {
    /// Build an error from a path given outermost segment first
    pub fn at(path: &[&str], message: impl Into<String>) -> Self {
        let mut segments = path.to_vec();
        segments.reverse();
        Self {
            path: segments.join("."),
            message: message.into(),
        }
    }
}

pub(crate) static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(path: &[&str], expected: &str, value: &Value) -> ValidationError {
    ValidationError::at(
        path,
        format!("Expected {}, received {}", expected, type_name(value)),
    )
}

pub(crate) fn object<'a>(
    value: &'a Value,
    path: &[&str],
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| type_mismatch(path, "object", value))
}

/// Look up a required key; an absent key is reported as `Required`
pub(crate) fn required<'a>(
    fields: &'a Map<String, Value>,
    path: &[&str],
) -> Result<&'a Value, ValidationError> {
    let key = path.last().copied().unwrap_or_default();
    fields
        .get(key)
        .ok_or_else(|| ValidationError::at(path, "Required"))
}

pub(crate) fn optional<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key)
}

/// Length bounds for a trimmed string, with the message for each bound
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextRule {
    pub min: Option<(usize, &'static str)>,
    pub max: Option<(usize, &'static str)>,
}

impl TextRule {
    pub const fn non_empty(message: &'static str) -> Self {
        Self {
            min: Some((1, message)),
            max: None,
        }
    }

    pub const fn bounded(min: (usize, &'static str), max: (usize, &'static str)) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Type-check, trim, then apply the length bounds (counted in characters)
pub(crate) fn text(
    value: &Value,
    path: &[&str],
    rule: TextRule,
) -> Result<String, ValidationError> {
    let raw = value
        .as_str()
        .ok_or_else(|| type_mismatch(path, "string", value))?;
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if let Some((min, message)) = rule.min {
        if length < min {
            return Err(ValidationError::at(path, message));
        }
    }
    if let Some((max, message)) = rule.max {
        if length > max {
            return Err(ValidationError::at(path, message));
        }
    }
    Ok(trimmed.to_string())
}

/// Trimmed, lower-cased, RFC-shaped email address of 6 to 30 characters
pub(crate) fn email(value: &Value, path: &[&str]) -> Result<String, ValidationError> {
    let any_length = TextRule {
        min: None,
        max: None,
    };
    let address = text(value, path, any_length)?.to_lowercase();
    if !EMAIL_PATTERN.is_match(&address) {
        return Err(ValidationError::at(path, "Invalid email address"));
    }
    let length = address.chars().count();
    if length < 6 {
        return Err(ValidationError::at(path, "email-ID must be 6 or more characters"));
    }
    if length > 30 {
        return Err(ValidationError::at(path, "email-ID can not have more than 30 characters"));
    }
    Ok(address)
}

/// Array of vocabulary entries, de-duplicated in first-seen order
///
/// With a minimum, the bound is checked against the raw array first and
/// again after de-duplication, so repeats cannot pad the count.
pub(crate) fn preferences(
    value: &Value,
    path: &[&str],
    min: Option<(usize, &'static str)>,
) -> Result<Vec<Preference>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| type_mismatch(path, "array", value))?;

    if let Some((min, message)) = min {
        if items.len() < min {
            return Err(ValidationError::at(path, message));
        }
    }

    let mut chosen: Vec<Preference> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let index = index.to_string();
        let mut item_path = path.to_vec();
        item_path.push(&index);

        let parsed = item
            .as_str()
            .and_then(|s| s.parse::<Preference>().ok())
            .ok_or_else(|| {
                ValidationError::at(
                    &item_path,
                    format!(
                        "Preferences must be one of the following: {}",
                        Preference::vocabulary()
                    ),
                )
            })?;
        if !chosen.contains(&parsed) {
            chosen.push(parsed);
        }
    }

    if let Some((min, message)) = min {
        if chosen.len() < min {
            return Err(ValidationError::at(path, message));
        }
    }
    Ok(chosen)
}

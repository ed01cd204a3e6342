//! Search filter
//!
//! `?filter=` on the search routes. An absent filter is the empty string,
//! which matches everything.

use serde::Deserialize;

use crate::backend::validation::ValidationError;

const MAX_FILTER_LENGTH: usize = 50;

/// Query string accepted by the search routes
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

pub fn filter(query: &FilterQuery) -> Result<String, ValidationError> {
    let trimmed = query.filter.as_deref().unwrap_or_default().trim();
    if trimmed.chars().count() > MAX_FILTER_LENGTH {
        return Err(ValidationError::at(
            &["filter"],
            "Filter must be 50 or fewer characters long",
        ));
    }
    Ok(trimmed.to_string())
}

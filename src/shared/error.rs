//! Shared Error Types
//!
//! Errors raised while decoding the shared wire types. Both the validation
//! layer and the storage adapters decode vocabulary strings, so the error
//! lives here rather than in either of them.
//!
//! # Usage
//!
//! ```rust
//! use quillpost::shared::{Preference, SharedError};
//!
//! let err = "knitting".parse::<Preference>().unwrap_err();
//! assert!(matches!(err, SharedError::UnknownPreference { .. }));
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A preference or tag outside the fixed vocabulary
    #[error("unknown preference '{value}'")]
    UnknownPreference {
        /// The rejected value
        value: String,
    },
}

impl SharedError {
    /// Create a new unknown-preference error
    pub fn unknown_preference(value: impl Into<String>) -> Self {
        Self::UnknownPreference {
            value: value.into(),
        }
    }
}

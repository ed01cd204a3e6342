//! API Error Types
//!
//! Every failure a handler can surface maps onto one of six variants. Each
//! variant knows its HTTP status and the `error` category string that goes
//! into the response body.
//!
//! # Error Categories
//!
//! | Variant | Status | `error` |
//! |---|---|---|
//! | `Validation` | 400 | `Bad Request` (plus `path`) |
//! | `BadRequest` | 400 | `Bad Request` |
//! | `Conflict` | 409 | caller-supplied |
//! | `Unauthorized` | 401 | `Unauthorized` |
//! | `NotFound` | 404 | caller-supplied |
//! | `Internal` | 500 | `Internal Server Error` |

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A request body or query failed schema validation
    #[error("{path}: {message}")]
    Validation {
        /// Offending field, innermost segment first
        path: String,
        message: String,
    },

    /// A malformed request that is not tied to a body field
    #[error("{message}")]
    BadRequest { message: String },

    /// A uniqueness guard rejected the request
    #[error("{error}: {message}")]
    Conflict { error: String, message: String },

    /// Missing or rejected credentials
    #[error("{message}")]
    Unauthorized { message: String },

    /// The referenced entity does not exist
    #[error("{error}: {message}")]
    NotFound { error: String, message: String },

    /// Storage, hashing or signing failed
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` field of the response body
    pub fn category(&self) -> &str {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => "Bad Request",
            Self::Conflict { error, .. } | Self::NotFound { error, .. } => error,
            Self::Unauthorized { .. } => "Unauthorized",
            Self::Internal { .. } => "Internal Server Error",
        }
    }

    /// The `message` field of the response body
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::BadRequest { message }
            | Self::Conflict { message, .. }
            | Self::Unauthorized { message }
            | Self::NotFound { message, .. }
            | Self::Internal { message } => message,
        }
    }

    /// The `path` field, present only on validation failures
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Validation { path, .. } => Some(path),
            _ => None,
        }
    }
}

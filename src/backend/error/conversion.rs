//! Error Conversion
//!
//! `IntoResponse` for [`ApiError`] and the `From` conversions that let
//! handlers propagate lower-layer errors with `?`.
//!
//! # Response Format
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "Bad Request",
//!   "message": "username cannot be empty",
//!   "path": "username"
//! }
//! ```
//!
//! `path` is only present for validation failures.

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::error::types::ApiError;
use crate::backend::store::StoreError;
use crate::backend::validation::ValidationError;

impl ApiError {
    /// Build the JSON body for this error
    pub fn body(&self) -> Value {
        let mut body = json!({
            "error": self.category(),
            "message": self.message(),
            "success": false,
        });
        if let (Some(path), Some(map)) = (self.path(), body.as_object_mut()) {
            map.insert("path".to_string(), Value::String(path.to_string()));
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message } = &self {
            tracing::error!("Internal error: {}", message);
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.path, err.message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                ApiError::conflict("Conflict", format!("{} already exists", field))
            }
            StoreError::UnknownUser => ApiError::not_found("User not found", "User does not exist"),
            StoreError::UnknownBlog => ApiError::not_found("Not Found", "Blog not found"),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(message) => ApiError::internal(message),
            rejected => ApiError::unauthorized(rejected.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::internal(err.to_string())
    }
}

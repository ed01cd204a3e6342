/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * `POST /api/v1/user/login`.
 *
 * # Login Process
 *
 * 1. Validate the body
 * 2. Look the user up by (normalized) email
 * 3. Verify the password on the blocking pool
 * 4. Return a fresh bearer token
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::server::state::AppState;
use crate::backend::validation;
use crate::shared::AuthResponse;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - first schema violation, with its `path`
/// * `404 Not Found` - no user with this email
/// * `401 Unauthorized` - wrong password
/// * `500 Internal Server Error` - storage or signing failed
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(body) = payload?;
    let input = validation::user::login(&body)?;
    tracing::info!("Login request for: {}", input.email);

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", input.email);
            ApiError::not_found("User not found", "Incorrect email address")
        })?;

    let valid = state
        .passwords
        .verify_blocking(input.password, user.password_hash.clone())
        .await;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(ApiError::unauthorized("Incorrect password entered"));
    }

    let token = state.tokens.issue(user.id)?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        message: "User logged in successfully".to_string(),
        success: true,
    }))
}

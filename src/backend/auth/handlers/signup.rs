/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * `POST /api/v1/user/signup`.
 *
 * # Registration Process
 *
 * 1. Validate the body (first violation wins)
 * 2. Reject a username or email that is already registered
 * 3. Hash the password on the blocking pool
 * 4. Create the user
 * 5. Return a bearer token for the new user
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt and never returned
 * - The store's unique constraints back the pre-check, so a concurrent
 *   signup with the same username or email still fails with 409
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::backend::error::ApiResult;
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::backend::users::{user_exists, user_store_error};
use crate::backend::validation;
use crate::shared::AuthResponse;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - first schema violation, with its `path`
/// * `409 Conflict` - username or email already registered; `error` names which
/// * `500 Internal Server Error` - hashing, storage or signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/v1/user/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ada",
///   "name": { "first": "Ada", "last": "Lovelace" },
///   "password": "secret1",
///   "email": "ada@example.com",
///   "preferences": ["tech", "science", "history"]
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(body) = payload?;
    let input = validation::user::signup(&body)?;
    tracing::info!("Signup request for username: {}", input.username);

    if let Some(conflict) = state.users.find_conflict(&input.username, &input.email).await? {
        tracing::warn!("Signup rejected for {}: {:?} taken", input.username, conflict);
        return Err(user_exists(conflict));
    }

    let password_hash = state.passwords.hash_blocking(input.password).await?;

    let user = state
        .users
        .insert(NewUser {
            username: input.username,
            name: input.name,
            email: input.email,
            password_hash,
            preferences: input.preferences,
        })
        .await
        .map_err(user_store_error)?;

    let token = state.tokens.issue(user.id)?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        message: "User created successfully".to_string(),
        success: true,
    }))
}

/**
 * User Handlers
 *
 * Handlers for the authenticated `/user` routes. Each one receives the
 * caller's id from the authentication gate through [`AuthUser`].
 *
 * # Routes
 *
 * - `PUT /user/update` - change username, name, email or preferences
 * - `DELETE /user/delete` - remove the account with its blogs, likes and comments
 * - `GET /user/bulk?filter=` - search users by username or name
 * - `GET /user/details` - the caller's own profile
 */

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::Users;
use crate::backend::users::user_store_error;
use crate::backend::validation::{self, FilterQuery};
use crate::shared::{MessageResponse, UserDetailsResponse, UsersResponse};

fn user_not_found() -> ApiError {
    ApiError::not_found("User not found", "User does not exist")
}

/// Read the `?filter=` query, reporting a malformed query string on `filter`
pub(crate) fn filter_param(
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation("filter", e.body_text()))?;
    Ok(validation::filter::filter(&query)?)
}

/// Update the caller's profile
///
/// Only fields present in the body change. Keys outside the profile
/// schema, including `password`, are ignored. A body with nothing to change
/// writes nothing.
///
/// # Errors
///
/// * `400 Bad Request` - first schema violation, with its `path`
/// * `404 Not Found` - the account no longer exists
/// * `409 Conflict` - the new username or email belongs to someone else
pub async fn update_user(
    State(users): State<Users>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = payload?;
    let changes = validation::user::update(&body)?;

    let updated = if changes.is_empty() {
        users.find_by_id(user.user_id).await?.is_some()
    } else {
        users
            .update(user.user_id, &changes)
            .await
            .map_err(user_store_error)?
    };
    if !updated {
        tracing::warn!("Profile update for missing user {}", user.user_id);
        return Err(user_not_found());
    }

    tracing::info!("User {} updated their profile", user.user_id);
    Ok(Json(MessageResponse::ok("User-Info updated successfully")))
}

/// Delete the caller's account
pub async fn delete_user(
    State(users): State<Users>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    if !users.delete(user.user_id).await? {
        return Err(user_not_found());
    }

    tracing::info!("User {} deleted", user.user_id);
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}

/// Search users by a case-insensitive substring of username, first or last
/// name; an absent filter lists everyone
pub async fn search_users(
    State(users): State<Users>,
    AuthUser(_user): AuthUser,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> ApiResult<Json<UsersResponse>> {
    let filter = filter_param(query)?;
    let found = users.search(&filter).await?;

    Ok(Json(UsersResponse {
        users: found.iter().map(|u| u.summary()).collect(),
        message: "Users fetched successfully.".to_string(),
        success: true,
    }))
}

/// The caller's profile, without the password hash
pub async fn get_details(
    State(users): State<Users>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UserDetailsResponse>> {
    let record = users
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(UserDetailsResponse {
        user: record.details(),
        message: "Users details fetched successfully".to_string(),
        success: true,
    }))
}

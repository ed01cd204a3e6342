/**
 * Authentication Middleware
 *
 * This module provides the gate in front of every protected route. It reads
 * the bearer token from the Authorization header, verifies it and hands the
 * user id to handlers through request extensions.
 *
 * # Outcomes
 *
 * | Request                                   | Response |
 * |-------------------------------------------|----------|
 * | no `Authorization` header                 | 401 `Access Token is missing` |
 * | header not of the form `Bearer <token>`   | 400 `Invalid authorization key.` |
 * | token decodes but has no user id          | 401 `Invalid Access token supplied` |
 * | any other verification failure            | 401 with the verifier's message |
 * | valid token                               | handler runs |
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::ApiError;

/// Authenticated user data extracted from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Pull the token out of an `Authorization` header value
///
/// Accepts `Bearer <token>` with a non-empty token; the scheme is
/// case-sensitive.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Verifies it with the shared [`TokenService`]
/// 3. Attaches [`AuthenticatedUser`] to request extensions
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request.headers().get(AUTHORIZATION).ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        ApiError::unauthorized("Access Token is missing")
    })?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::bad_request("Invalid authorization key.")
        })?;

    let user_id = tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        ApiError::from(e)
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid behind [`auth_middleware`]; outside it the extractor rejects
/// with 401.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthorized("Access Token is missing")
            })?;

        Ok(AuthUser(user))
    }
}

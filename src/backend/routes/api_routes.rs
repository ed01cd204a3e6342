/**
 * API Route Handlers
 *
 * This module wires handlers to paths under `/api/v1`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /user/signup` - User registration
 * - `POST /user/login` - User login
 *
 * ## Authenticated (bearer token)
 * - `PUT /user/update`, `DELETE /user/delete`, `GET /user/bulk`, `GET /user/details`
 * - `POST /blog/create`, `PUT /blog/update/{id}`, `DELETE /blog/delete/{id}`
 * - `GET /blog` (also `/blog/`), `GET /blog/all`, `GET /blog/recommended`
 * - `PUT /blog/like/{id}`, `PUT /blog/comment/{id}`
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{login, signup};
use crate::backend::blogs::{
    add_comment, all_blogs, create_blog, delete_blog, my_blogs, recommended_blogs, toggle_like,
    update_blog,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::users::{delete_user, get_details, search_users, update_user};

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
}

/// Routes behind the authentication gate
///
/// The gate is a `route_layer`, so it only runs for requests that matched
/// one of these routes; unknown paths still reach the fallback.
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        // User endpoints
        .route("/user/update", put(update_user))
        .route("/user/delete", delete(delete_user))
        .route("/user/bulk", get(search_users))
        .route("/user/details", get(get_details))
        // Blog endpoints
        .route("/blog", get(my_blogs))
        .route("/blog/", get(my_blogs))
        .route("/blog/all", get(all_blogs))
        .route("/blog/recommended", get(recommended_blogs))
        .route("/blog/create", post(create_blog))
        .route("/blog/update/{id}", put(update_blog))
        .route("/blog/delete/{id}", delete(delete_blog))
        .route("/blog/like/{id}", put(toggle_like))
        .route("/blog/comment/{id}", put(add_comment))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}

/// Every `/api/v1` route
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    public_routes().merge(protected_routes(app_state))
}

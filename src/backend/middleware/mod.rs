//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//! Middleware functions process requests before they reach handlers.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - Bearer-token gate for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use quillpost::backend::middleware::auth_middleware;
//! use quillpost::backend::server::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};

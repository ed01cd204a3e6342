//! Backend Module
//!
//! This module contains all server-side code for the blog platform: an Axum
//! HTTP server exposing user and blog routes under `/api/v1`.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, JWT tokens, signup and login
//! - **`middleware`** - The bearer-token gate
//! - **`users`** - Profile update/delete, search and details
//! - **`blogs`** - Blog CRUD, listings, likes and comments
//! - **`validation`** - Request schemas producing typed inputs
//! - **`store`** - Persistence ports and their adapters
//! - **`error`** - `ApiError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Credentials, sessions, signup/login
//! ├── middleware/     - Request middleware
//! ├── users/          - User handlers
//! ├── blogs/          - Blog handlers
//! ├── validation/     - Request validation
//! ├── store/          - PostgreSQL and in-memory stores
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! route → authentication gate (protected routes) → validation → store →
//! hasher / token service → JSON response. Any failure along the way is an
//! `ApiError`, rendered as `{ error, message, success: false }` with the
//! matching status code.
//!
//! # State Management
//!
//! `AppState` holds the two store handles, the token service and the
//! password hasher. None of it is mutated after start-up; per-request
//! mutation happens inside the store.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and session management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// User routes
pub mod users;

/// Blog routes
pub mod blogs;

/// Request validation
pub mod validation;

/// Persistence
pub mod store;

pub use error::{ApiError, ApiResult};
pub use server::{create_app, AppConfig, AppState};

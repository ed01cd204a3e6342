//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health and fallback
//! └── api_routes.rs   - `/api/v1` user and blog routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use quillpost::backend::auth::{PasswordHasher, TokenService};
//! use quillpost::backend::routes::create_router;
//! use quillpost::backend::server::state::AppState;
//!
//! let state = AppState::in_memory(TokenService::new("secret"), PasswordHasher::default());
//! let router = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

pub use router::{create_router, API_PREFIX};

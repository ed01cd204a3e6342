//! Quillpost - Main Library
//!
//! Quillpost is a blog platform backend: user accounts with signup, login,
//! profile management and search, and blog posts with filtering,
//! preference-based recommendation, likes and comments.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types any client can depend on
//!   - User and blog projections, response bodies
//!   - The preference/tag vocabulary
//!
//! - **`backend`** - The Axum server
//!   - Routes, authentication gate, validation
//!   - PostgreSQL and in-memory stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use quillpost::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, one `thiserror` enum per layer
//! - `backend::error::ApiError` at the HTTP boundary

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

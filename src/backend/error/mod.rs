//! Backend Error Module
//!
//! This module defines the error type every HTTP handler returns and its
//! mapping onto status codes and JSON bodies.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and its constructors
//! └── conversion.rs - IntoResponse and From implementations
//! ```
//!
//! # Propagation
//!
//! Validation errors are raised before any store access. Store, hashing and
//! token-signing failures are converted to `ApiError::Internal` with the
//! underlying message. Token verification failures become
//! `ApiError::Unauthorized`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;

/// Result alias used by handlers
pub type ApiResult<T> = Result<T, ApiError>;

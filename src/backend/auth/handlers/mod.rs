//! Authentication Handlers Module
//!
//! HTTP handlers for the two routes that run without a token.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── signup.rs   - User registration handler
//! └── login.rs    - User authentication handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/v1/user/signup - User registration
//! - **`login`** - POST /api/v1/user/login - User authentication
//!
//! Both return `{ token, message, success }`; the token goes in
//! `Authorization: Bearer <token>` on every other route.

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

pub use login::login;
pub use signup::signup;

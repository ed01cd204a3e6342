//! Authentication Module
//!
//! This module handles credentials and sessions: password hashing, bearer
//! token issue and verification, and the signup/login handlers that tie
//! them to the user store.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for signup and login
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Credential hashing
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── signup.rs   - User registration handler
//!     └── login.rs    - User authentication handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: validated profile → user created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Protected routes**: token verified by `backend::middleware::auth`
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs carrying only the user id and issue time
//! - Tokens carry no expiry; rotating `JWT_SECRET` invalidates all of them

/// Credential hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, signup};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{TokenError, TokenService};

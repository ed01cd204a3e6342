//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and validation
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - AppConfig, ConfigError and database loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()` in the binary
//! 2. **State Creation**: token service, hasher and store
//! 3. **Router Creation**: routes, auth gate, tracing and CORS layers
//!
//! # Example
//!
//! ```rust,no_run
//! use quillpost::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() {
//! let config = AppConfig::from_env().unwrap();
//! let app = create_app(&config).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AppConfig, ConfigError};
pub use init::{build_state, create_app};
pub use state::AppState;

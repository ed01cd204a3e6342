//! Shared Module
//!
//! This module contains the wire types exchanged between the backend and any
//! client of the blog API. Everything here is plain data: serializable
//! request/response bodies and the preference vocabulary.
//!
//! # Overview
//!
//! - **`preference`** - The fixed tag vocabulary shared by user preferences
//!   and blog tags
//! - **`user`** - User projections and user-route response bodies
//! - **`blog`** - Blog documents and blog-route response bodies
//! - **`error`** - Errors raised while decoding shared types

/// Preference/tag vocabulary
pub mod preference;

/// User wire types
pub mod user;

/// Blog wire types
pub mod blog;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use blog::{Blog, BlogCreatedResponse, BlogsResponse, Comment, LikeResponse, Likes};
pub use error::SharedError;
pub use preference::Preference;
pub use user::{
    AuthResponse, FullName, UserDetails, UserDetailsResponse, UserSummary, UsersResponse,
};

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body returned by mutating routes with no payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

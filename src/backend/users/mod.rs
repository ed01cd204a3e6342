//! Users Module
//!
//! Profile routes for the signed-in user plus the user search. Signup and
//! login live in `backend::auth` because they run without a token.
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs      - Module exports and conflict mapping
//! └── handlers.rs - update, delete, bulk and details handlers
//! ```

use crate::backend::error::ApiError;
use crate::backend::store::{StoreError, UserConflict};

/// HTTP handlers for the `/user` routes
pub mod handlers;

pub use handlers::{delete_user, get_details, search_users, update_user};

/// 409 naming the field a signup or profile update collides with
pub fn user_exists(conflict: UserConflict) -> ApiError {
    let error = match conflict {
        UserConflict::Username => "This username is already taken",
        UserConflict::Email => "This email address already exists",
    };
    ApiError::conflict(error, "User already exists")
}

/// Map a store failure, turning username/email duplicates into [`user_exists`]
pub fn user_store_error(err: StoreError) -> ApiError {
    match &err {
        StoreError::Duplicate { field } if field == "username" => {
            user_exists(UserConflict::Username)
        }
        StoreError::Duplicate { field } if field == "email" => user_exists(UserConflict::Email),
        _ => err.into(),
    }
}

//! Blogs Module
//!
//! Every `/blog` route sits behind the authentication gate. Blogs are
//! created by the caller, can only be edited or removed by their author,
//! and can be liked and commented on by anyone signed in.
//!
//! # Module Structure
//!
//! ```text
//! blogs/
//! ├── mod.rs      - Module exports and error helpers
//! └── handlers.rs - create/update/delete, listings, like and comment
//! ```

use crate::backend::error::ApiError;
use crate::backend::store::StoreError;

/// HTTP handlers for the `/blog` routes
pub mod handlers;

pub use handlers::{
    add_comment, all_blogs, create_blog, delete_blog, my_blogs, recommended_blogs, toggle_like,
    update_blog,
};

pub fn title_taken() -> ApiError {
    ApiError::conflict("Conflict", "Blog with same title exits")
}

pub fn blog_not_found() -> ApiError {
    ApiError::not_found("Not Found", "Blog not found")
}

/// Map a store failure, turning a duplicate title into [`title_taken`]
pub fn blog_store_error(err: StoreError) -> ApiError {
    match &err {
        StoreError::Duplicate { field } if field == "title" => title_taken(),
        _ => err.into(),
    }
}

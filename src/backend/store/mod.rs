//! Store Module
//!
//! Persistence ports for users and blogs. Handlers only see the
//! [`UserStore`] and [`BlogStore`] traits; the server picks an adapter at
//! start-up.
//!
//! # Adapters
//!
//! - **`postgres`** - sqlx/PostgreSQL, used when `DATABASE_URL` is set
//! - **`memory`** - process-local maps, used without a database and in tests
//!
//! Both adapters enforce username, email and title uniqueness themselves,
//! so a request that slips past a handler's pre-check still fails with
//! [`StoreError::Duplicate`]. Writes on behalf of a user that has since been
//! deleted fail with [`StoreError::UnknownUser`] in either adapter.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{Blog, FullName, Preference, UserDetails, UserSummary};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgBlogStore, PgUserStore};

/// Persistence failures raised by store adapters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique field already holds this value
    #[error("{field} already exists")]
    Duplicate { field: String },

    /// The acting user no longer exists
    #[error("user does not exist")]
    UnknownUser,

    /// The referenced blog no longer exists
    #[error("blog does not exist")]
    UnknownBlog,

    /// Query or mutation failed during execution
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A stored user, including the credential digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub name: FullName,
    pub email: String,
    pub password_hash: String,
    pub preferences: Vec<Preference>,
}

impl UserRecord {
    /// Search-result projection
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            id: self.id,
        }
    }

    /// Profile projection
    pub fn details(&self) -> UserDetails {
        UserDetails {
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            preferences: self.preferences.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: FullName,
    pub email: String,
    pub password_hash: String,
    pub preferences: Vec<Preference>,
}

/// Partial profile update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub preferences: Option<Vec<Preference>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.preferences.is_none()
    }

    pub(crate) fn apply(&self, user: &mut UserRecord) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(first) = &self.first_name {
            user.name.first = first.clone();
        }
        if let Some(last) = &self.last_name {
            user.name.last = last.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(preferences) = &self.preferences {
            user.preferences = preferences.clone();
        }
    }
}

/// Which unique user field an incoming signup collides with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserConflict {
    Username,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub author: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<Preference>,
}

/// Partial blog update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<Preference>>,
}

impl BlogChanges {
    pub(crate) fn apply(&self, blog: &mut Blog) {
        if let Some(title) = &self.title {
            blog.title = title.clone();
        }
        if let Some(body) = &self.body {
            blog.body = body.clone();
        }
        if let Some(tags) = &self.tags {
            blog.tags = tags.clone();
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Report whether `username` or `email` is already taken, username first
    async fn find_conflict(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserConflict>, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Apply `changes`; returns `false` when the user does not exist
    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<bool, StoreError>;

    /// Delete the user with their blogs, likes and comments
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Case-insensitive substring match over username, first and last name
    async fn search(&self, filter: &str) -> Result<Vec<UserRecord>, StoreError>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::UnknownUser`] when the author is gone
    async fn insert(&self, blog: NewBlog) -> Result<Blog, StoreError>;

    /// Update a blog owned by `author`; `false` when there is no such blog
    async fn update(
        &self,
        id: Uuid,
        author: Uuid,
        changes: &BlogChanges,
    ) -> Result<bool, StoreError>;

    /// Delete a blog owned by `author`; `false` when there is no such blog
    async fn delete(&self, id: Uuid, author: Uuid) -> Result<bool, StoreError>;

    /// Case-insensitive substring match over title or any tag, optionally
    /// restricted to one author
    async fn search(&self, author: Option<Uuid>, filter: &str) -> Result<Vec<Blog>, StoreError>;

    /// Blogs sharing at least one tag with `preferences`
    async fn recommended(&self, preferences: &[Preference]) -> Result<Vec<Blog>, StoreError>;

    /// Flip `user`'s like; `None` when the blog does not exist, otherwise
    /// whether the user now likes it. An unknown `user` is an error.
    async fn toggle_like(&self, id: Uuid, user: Uuid) -> Result<Option<bool>, StoreError>;

    /// Append a comment; `false` when the blog does not exist, an error
    /// when the user does not
    async fn add_comment(&self, id: Uuid, user: Uuid, message: &str) -> Result<bool, StoreError>;
}

/// Case-insensitive literal substring test shared by the in-process matchers
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

//! Blog wire types
//!
//! A `Blog` is serialized with the field names clients already rely on
//! (`_id`, `authoredDate`, `likes.count`, ...). The like count is never
//! stored: it is the length of the liked-by set at the moment of
//! serialization, so the two cannot drift.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::shared::preference::Preference;

/// Users who liked a blog
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Likes {
    #[serde(default)]
    pub users: Vec<Uuid>,
}

impl Likes {
    pub fn new(users: Vec<Uuid>) -> Self {
        Self { users }
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}

impl Serialize for Likes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Likes", 2)?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field("users", &self.users)?;
        state.end()
    }
}

/// One entry in a blog's comment thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub user: Uuid,
    pub message: String,
}

/// A blog document as returned by the listing routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub author: Uuid,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub likes: Likes,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub authored_date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Preference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreatedResponse {
    pub message: String,
    pub blog_id: Uuid,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogsResponse {
    pub blogs: Vec<Blog>,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    pub message: String,
    /// `true` when the toggle added the caller's like
    pub liked: bool,
}

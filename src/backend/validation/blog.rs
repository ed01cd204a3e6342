//! Blog request schemas

use serde_json::Value;
use uuid::Uuid;

use crate::backend::store::BlogChanges;
use crate::backend::validation::{
    object, optional, preferences, required, text, TextRule, ValidationError,
};
use crate::shared::Preference;

const TITLE: TextRule = TextRule::non_empty("blog title can not be empty");
const BODY: TextRule = TextRule::non_empty("blog body can not be empty");
const COMMENT: TextRule = TextRule::bounded(
    (1, "comment can not be empty"),
    (500, "comment can not have more than 500 characters"),
);

/// Validated `POST /blog/create` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogInput {
    pub title: String,
    pub body: String,
    pub tags: Vec<Preference>,
}

pub fn create(body: &Value) -> Result<NewBlogInput, ValidationError> {
    let fields = object(body, &[])?;
    let title = text(required(fields, &["title"])?, &["title"], TITLE)?;
    let body = text(required(fields, &["body"])?, &["body"], BODY)?;
    let tags = preferences(required(fields, &["tags"])?, &["tags"], None)?;
    Ok(NewBlogInput { title, body, tags })
}

/// Validate `PUT /blog/update/{id}`; only title, body and tags can change
pub fn update(body: &Value) -> Result<BlogChanges, ValidationError> {
    let fields = object(body, &[])?;
    let mut changes = BlogChanges::default();
    if let Some(value) = optional(fields, "title") {
        changes.title = Some(text(value, &["title"], TITLE)?);
    }
    if let Some(value) = optional(fields, "body") {
        changes.body = Some(text(value, &["body"], BODY)?);
    }
    if let Some(value) = optional(fields, "tags") {
        changes.tags = Some(preferences(value, &["tags"], None)?);
    }
    Ok(changes)
}

/// Validate `PUT /blog/comment/{id}` and return the trimmed message
pub fn comment(body: &Value) -> Result<String, ValidationError> {
    let fields = object(body, &[])?;
    text(required(fields, &["comment"])?, &["comment"], COMMENT)
}

/// Parse a blog id taken from the request path
pub fn blog_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::at(&["id"], "Invalid blog id"))
}

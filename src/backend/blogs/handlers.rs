/**
 * Blog Handlers
 *
 * # Routes
 *
 * - `POST /blog/create` - publish a blog as the caller
 * - `PUT /blog/update/{id}` - edit one of the caller's blogs
 * - `DELETE /blog/delete/{id}` - remove one of the caller's blogs
 * - `GET /blog?filter=` - the caller's blogs, optionally filtered
 * - `GET /blog/all?filter=` - every blog, optionally filtered
 * - `GET /blog/recommended` - blogs tagged with one of the caller's preferences
 * - `PUT /blog/like/{id}` - like, or undo a like
 * - `PUT /blog/comment/{id}` - append a comment
 *
 * Filters match title or any tag, case-insensitively and literally.
 */

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::backend::blogs::{blog_not_found, blog_store_error, title_taken};
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::{Blogs, Users};
use crate::backend::store::NewBlog;
use crate::backend::users::handlers::filter_param;
use crate::backend::validation::{self, FilterQuery};
use crate::shared::{BlogCreatedResponse, BlogsResponse, LikeResponse, MessageResponse};

fn blogs_response(blogs: Vec<crate::shared::Blog>, message: &str) -> Json<BlogsResponse> {
    Json(BlogsResponse {
        blogs,
        message: message.to_string(),
        success: true,
    })
}

/// Create a blog authored by the caller
///
/// # Errors
///
/// * `400 Bad Request` - first schema violation, with its `path`
/// * `409 Conflict` - a blog with this title already exists
pub async fn create_blog(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BlogCreatedResponse>> {
    let Json(body) = payload?;
    let input = validation::blog::create(&body)?;

    if blogs.title_exists(&input.title).await? {
        tracing::warn!("Blog title already in use: {}", input.title);
        return Err(title_taken());
    }

    let blog = blogs
        .insert(NewBlog {
            author: user.user_id,
            title: input.title,
            body: input.body,
            tags: input.tags,
        })
        .await
        .map_err(blog_store_error)?;

    tracing::info!("Blog {} created by {}", blog.id, user.user_id);
    Ok(Json(BlogCreatedResponse {
        message: "Blog created successfully".to_string(),
        blog_id: blog.id,
        success: true,
    }))
}

/// Edit title, body or tags of one of the caller's blogs
pub async fn update_blog(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = validation::blog::blog_id(&id)?;
    let Json(body) = payload?;
    let changes = validation::blog::update(&body)?;

    let updated = blogs
        .update(id, user.user_id, &changes)
        .await
        .map_err(blog_store_error)?;
    if !updated {
        return Err(blog_not_found());
    }

    Ok(Json(MessageResponse::ok("Blog updated successfully")))
}

pub async fn delete_blog(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = validation::blog::blog_id(&id)?;
    if !blogs.delete(id, user.user_id).await? {
        return Err(blog_not_found());
    }

    tracing::info!("Blog {} deleted by {}", id, user.user_id);
    Ok(Json(MessageResponse::ok("Blog deleted successfully")))
}

/// The caller's own blogs
pub async fn my_blogs(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> ApiResult<Json<BlogsResponse>> {
    let filter = filter_param(query)?;
    let found = blogs.search(Some(user.user_id), &filter).await?;
    Ok(blogs_response(found, "fetched all the users' blogs successfully"))
}

pub async fn all_blogs(
    State(blogs): State<Blogs>,
    AuthUser(_user): AuthUser,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> ApiResult<Json<BlogsResponse>> {
    let filter = filter_param(query)?;
    let found = blogs.search(None, &filter).await?;
    Ok(blogs_response(found, "fetched all the blogs successfully"))
}

/// Blogs sharing at least one tag with the caller's preferences
pub async fn recommended_blogs(
    State(users): State<Users>,
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<BlogsResponse>> {
    let record = users
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found", "User does not exist"))?;

    let found = blogs.recommended(&record.preferences).await?;
    Ok(blogs_response(found, "fetched all the recommended blogs successfully"))
}

/// Toggle the caller's like; `liked` reports the state after the toggle
pub async fn toggle_like(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<LikeResponse>> {
    let id = validation::blog::blog_id(&id)?;
    let liked = blogs
        .toggle_like(id, user.user_id)
        .await?
        .ok_or_else(blog_not_found)?;

    tracing::debug!("User {} toggled like on {} (liked: {})", user.user_id, id, liked);
    Ok(Json(LikeResponse {
        success: true,
        message: "Like toggled successfully".to_string(),
        liked,
    }))
}

pub async fn add_comment(
    State(blogs): State<Blogs>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = validation::blog::blog_id(&id)?;
    let Json(body) = payload?;
    let message = validation::blog::comment(&body)?;

    if !blogs.add_comment(id, user.user_id, &message).await? {
        return Err(blog_not_found());
    }

    Ok(Json(MessageResponse::ok("Comment added successfully")))
}

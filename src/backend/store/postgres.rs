//! PostgreSQL store
//!
//! sqlx adapters for the store ports. Schema lives in `migrations/`.
//! Likes and comments are child tables of `blogs`; a blog row is assembled
//! with one query that aggregates both, likes in the order they were
//! given and comments in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::{
    BlogChanges, BlogStore, NewBlog, NewUser, StoreError, UserChanges, UserConflict, UserRecord,
    UserStore,
};
use crate::shared::{Blog, Comment, FullName, Likes, Preference};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let field = match db_err.constraint() {
                    Some("users_username_key") => "username",
                    Some("users_email_key") => "email",
                    Some("blogs_title_key") => "title",
                    Some(other) => other,
                    None => "value",
                };
                return StoreError::duplicate(field);
            }
            if db_err.is_foreign_key_violation() {
                return match db_err.constraint() {
                    Some(name) if name.ends_with("blog_id_fkey") => StoreError::UnknownBlog,
                    _ => StoreError::UnknownUser,
                };
            }
        }
        StoreError::query(err.to_string())
    }
}

fn parse_tags(raw: Vec<String>) -> Result<Vec<Preference>, StoreError> {
    raw.iter()
        .map(|tag| tag.parse::<Preference>().map_err(|e| StoreError::query(e.to_string())))
        .collect()
}

fn tag_names(tags: &[Preference]) -> Vec<String> {
    tags.iter().map(|tag| tag.as_str().to_string()).collect()
}

/// `%filter%` for ILIKE with the pattern metacharacters escaped
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    preferences: Vec<String>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            username: row.username,
            name: FullName {
                first: row.first_name,
                last: row.last_name,
            },
            email: row.email,
            password_hash: row.password_hash,
            preferences: parse_tags(row.preferences)?,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, first_name, last_name, email, password_hash, preferences";

/// Users backed by the `users` table
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_conflict(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserConflict>, StoreError> {
        let (username_taken, email_taken): (Option<bool>, Option<bool>) = sqlx::query_as(
            r#"
            SELECT bool_or(username = $1), bool_or(email = $2)
            FROM users
            WHERE username = $1 OR email = $2
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(match (username_taken, email_taken) {
            (Some(true), _) => Some(UserConflict::Username),
            (_, Some(true)) => Some(UserConflict::Email),
            _ => None,
        })
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users
                (id, username, first_name, last_name, email, password_hash, preferences)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.name.first)
        .bind(&user.name.last)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(tag_names(&user.preferences))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                preferences = COALESCE($6::text[], preferences)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.username.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.preferences.as_deref().map(tag_names))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, filter: &str) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1
            ORDER BY created_at, id
            "#
        ))
        .bind(like_pattern(filter))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    author: Uuid,
    title: String,
    body: String,
    tags: Vec<String>,
    authored_at: DateTime<Utc>,
    likes: Vec<Uuid>,
    comments: Json<Vec<Comment>>,
}

impl TryFrom<BlogRow> for Blog {
    type Error = StoreError;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        Ok(Blog {
            id: row.id,
            author: row.author,
            title: row.title,
            body: row.body,
            likes: Likes::new(row.likes),
            comments: row.comments.0,
            authored_date: row.authored_at,
            tags: parse_tags(row.tags)?,
        })
    }
}

const BLOG_SELECT: &str = r#"
    SELECT b.id, b.author, b.title, b.body, b.tags, b.authored_at,
        COALESCE(
            (SELECT array_agg(l.user_id ORDER BY l.liked_at, l.user_id)
             FROM blog_likes l WHERE l.blog_id = b.id),
            '{}'::uuid[]
        ) AS likes,
        COALESCE(
            (SELECT json_agg(
                        json_build_object('user', c.user_id, 'message', c.message)
                        ORDER BY c.id)
             FROM blog_comments c WHERE c.blog_id = b.id),
            '[]'::json
        ) AS comments
    FROM blogs b
"#;

/// Blogs backed by `blogs`, `blog_likes` and `blog_comments`
#[derive(Debug, Clone)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_blogs(rows: Vec<BlogRow>) -> Result<Vec<Blog>, StoreError> {
    rows.into_iter().map(Blog::try_from).collect()
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM blogs WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let (id, authored_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO blogs (id, author, title, body, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, authored_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(blog.author)
        .bind(&blog.title)
        .bind(&blog.body)
        .bind(tag_names(&blog.tags))
        .fetch_one(&self.pool)
        .await?;

        Ok(Blog {
            id,
            author: blog.author,
            title: blog.title,
            body: blog.body,
            likes: Likes::default(),
            comments: Vec::new(),
            authored_date: authored_at,
            tags: blog.tags,
        })
    }

    async fn update(
        &self,
        id: Uuid,
        author: Uuid,
        changes: &BlogChanges,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = COALESCE($3, title),
                body = COALESCE($4, body),
                tags = COALESCE($5::text[], tags)
            WHERE id = $1 AND author = $2
            "#,
        )
        .bind(id)
        .bind(author)
        .bind(changes.title.as_deref())
        .bind(changes.body.as_deref())
        .bind(changes.tags.as_deref().map(tag_names))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, author: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1 AND author = $2")
            .bind(id)
            .bind(author)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, author: Option<Uuid>, filter: &str) -> Result<Vec<Blog>, StoreError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            {BLOG_SELECT}
            WHERE ($1::uuid IS NULL OR b.author = $1)
              AND (b.title ILIKE $2
                   OR EXISTS (SELECT 1 FROM unnest(b.tags) AS t(tag) WHERE t.tag ILIKE $2))
            ORDER BY b.authored_at, b.id
            "#
        ))
        .bind(author)
        .bind(like_pattern(filter))
        .fetch_all(&self.pool)
        .await?;

        into_blogs(rows)
    }

    async fn recommended(&self, preferences: &[Preference]) -> Result<Vec<Blog>, StoreError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "{BLOG_SELECT} WHERE b.tags && $1::text[] ORDER BY b.authored_at, b.id"
        ))
        .bind(tag_names(preferences))
        .fetch_all(&self.pool)
        .await?;

        into_blogs(rows)
    }

    async fn toggle_like(&self, id: Uuid, user: Uuid) -> Result<Option<bool>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM blogs WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM blog_likes WHERE blog_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let liked = if removed == 0 {
            sqlx::query("INSERT INTO blog_likes (blog_id, user_id) VALUES ($1, $2)")
                .bind(id)
                .bind(user)
                .execute(&mut *tx)
                .await?;
            true
        } else {
            false
        };

        tx.commit().await?;
        Ok(Some(liked))
    }

    async fn add_comment(&self, id: Uuid, user: Uuid, message: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO blog_comments (blog_id, user_id, message)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM blogs WHERE id = $1)
            "#,
        )
        .bind(id)
        .bind(user)
        .bind(message)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

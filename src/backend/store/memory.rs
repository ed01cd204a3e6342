//! In-memory store
//!
//! Backs both ports with one pair of vectors behind a `tokio` lock, so a
//! user delete can cascade into blogs, likes and comments the same way the
//! database's foreign keys do. Insertion order is preserved in listings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::store::{
    contains_ignore_case, BlogChanges, BlogStore, NewBlog, NewUser, StoreError, UserChanges,
    UserConflict, UserRecord, UserStore,
};
use crate::shared::{Blog, Comment, Likes, Preference};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    blogs: Vec<Blog>,
}

impl Tables {
    fn has_user(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn user_conflict(
        &self,
        skip: Option<Uuid>,
        username: &str,
        email: &str,
    ) -> Option<UserConflict> {
        let others = || self.users.iter().filter(move |u| Some(u.id) != skip);
        if others().any(|u| u.username == username) {
            Some(UserConflict::Username)
        } else if others().any(|u| u.email == email) {
            Some(UserConflict::Email)
        } else {
            None
        }
    }

    fn title_taken(&self, skip: Option<Uuid>, title: &str) -> bool {
        self.blogs.iter().any(|b| Some(b.id) != skip && b.title == title)
    }
}

fn conflict_error(conflict: UserConflict) -> StoreError {
    match conflict {
        UserConflict::Username => StoreError::duplicate("username"),
        UserConflict::Email => StoreError::duplicate("email"),
    }
}

fn blog_matches(blog: &Blog, filter: &str) -> bool {
    contains_ignore_case(&blog.title, filter)
        || blog.tags.iter().any(|tag| contains_ignore_case(tag.as_str(), filter))
}

/// Process-local store implementing [`UserStore`] and [`BlogStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_conflict(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserConflict>, StoreError> {
        Ok(self.tables.read().await.user_conflict(None, username, email))
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(conflict) = tables.user_conflict(None, &user.username, &user.email) {
            return Err(conflict_error(conflict));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            preferences: user.preferences,
        };
        tables.users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.users.iter().position(|u| u.id == id) else {
            return Ok(false);
        };

        let mut updated = tables.users[index].clone();
        changes.apply(&mut updated);
        if let Some(conflict) = tables.user_conflict(Some(id), &updated.username, &updated.email) {
            return Err(conflict_error(conflict));
        }
        tables.users[index] = updated;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        tables.blogs.retain(|b| b.author != id);
        for blog in tables.blogs.iter_mut() {
            blog.likes.users.retain(|u| *u != id);
            blog.comments.retain(|c| c.user != id);
        }
        Ok(true)
    }

    async fn search(&self, filter: &str) -> Result<Vec<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| {
                contains_ignore_case(&u.username, filter)
                    || contains_ignore_case(&u.name.first, filter)
                    || contains_ignore_case(&u.name.last, filter)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.title_taken(None, title))
    }

    async fn insert(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.has_user(blog.author) {
            return Err(StoreError::UnknownUser);
        }
        if tables.title_taken(None, &blog.title) {
            return Err(StoreError::duplicate("title"));
        }
        let created = Blog {
            id: Uuid::new_v4(),
            author: blog.author,
            title: blog.title,
            body: blog.body,
            likes: Likes::default(),
            comments: Vec::new(),
            authored_date: Utc::now(),
            tags: blog.tags,
        };
        tables.blogs.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        author: Uuid,
        changes: &BlogChanges,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .blogs
            .iter()
            .position(|b| b.id == id && b.author == author)
        else {
            return Ok(false);
        };

        if let Some(title) = &changes.title {
            if tables.title_taken(Some(id), title) {
                return Err(StoreError::duplicate("title"));
            }
        }
        changes.apply(&mut tables.blogs[index]);
        Ok(true)
    }

    async fn delete(&self, id: Uuid, author: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.blogs.len();
        tables.blogs.retain(|b| !(b.id == id && b.author == author));
        Ok(tables.blogs.len() != before)
    }

    async fn search(&self, author: Option<Uuid>, filter: &str) -> Result<Vec<Blog>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .blogs
            .iter()
            .filter(|b| author.map_or(true, |a| b.author == a))
            .filter(|b| blog_matches(b, filter))
            .cloned()
            .collect())
    }

    async fn recommended(&self, preferences: &[Preference]) -> Result<Vec<Blog>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .blogs
            .iter()
            .filter(|b| b.tags.iter().any(|tag| preferences.contains(tag)))
            .cloned()
            .collect())
    }

    async fn toggle_like(&self, id: Uuid, user: Uuid) -> Result<Option<bool>, StoreError> {
        let mut tables = self.tables.write().await;
        let known_user = tables.has_user(user);
        let Some(blog) = tables.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if !known_user {
            return Err(StoreError::UnknownUser);
        }

        let likes = &mut blog.likes.users;
        if let Some(position) = likes.iter().position(|u| *u == user) {
            likes.remove(position);
            Ok(Some(false))
        } else {
            likes.push(user);
            Ok(Some(true))
        }
    }

    async fn add_comment(&self, id: Uuid, user: Uuid, message: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let known_user = tables.has_user(user);
        let Some(blog) = tables.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(false);
        };
        if !known_user {
            return Err(StoreError::UnknownUser);
        }
        blog.comments.push(Comment {
            user,
            message: message.to_string(),
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FullName;
    use assert_matches::assert_matches;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: FullName {
                first: "Ada".to_string(),
                last: "Lovelace".to_string(),
            },
            email: email.to_string(),
            password_hash: "digest".to_string(),
            preferences: vec![Preference::Tech, Preference::Music, Preference::Art],
        }
    }

    fn new_blog(author: Uuid, title: &str, tags: Vec<Preference>) -> NewBlog {
        NewBlog {
            author,
            title: title.to_string(),
            body: "body".to_string(),
            tags,
        }
    }

    async fn seed_user(store: &MemoryStore, username: &str) -> Uuid {
        let email = format!("{}@x.com", username);
        UserStore::insert(store, new_user(username, &email))
            .await
            .unwrap()
            .id
    }

    async fn seed_blog(
        store: &MemoryStore,
        author: Uuid,
        title: &str,
        tags: Vec<Preference>,
    ) -> Blog {
        BlogStore::insert(store, new_blog(author, title, tags))
            .await
            .unwrap()
    }

    async fn stored_blog(store: &MemoryStore, id: Uuid) -> Option<Blog> {
        BlogStore::search(store, None, "")
            .await
            .unwrap()
            .into_iter()
            .find(|b| b.id == id)
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let store = MemoryStore::new();
        UserStore::insert(&store, new_user("ada", "ada@x.com")).await.unwrap();

        assert_eq!(
            store.find_conflict("ada", "other@x.com").await.unwrap(),
            Some(UserConflict::Username)
        );
        assert_eq!(
            store.find_conflict("bob", "ada@x.com").await.unwrap(),
            Some(UserConflict::Email)
        );
        assert_eq!(store.find_conflict("bob", "bob@x.com").await.unwrap(), None);

        let err = UserStore::insert(&store, new_user("ada", "new@x.com"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Duplicate { field } if field == "username");
    }

    #[tokio::test]
    async fn test_user_update_respects_uniqueness() {
        let store = MemoryStore::new();
        let ada = seed_user(&store, "ada").await;
        seed_user(&store, "bob").await;

        let clash = UserChanges {
            email: Some("bob@x.com".to_string()),
            ..Default::default()
        };
        assert!(UserStore::update(&store, ada, &clash).await.is_err());

        let rename = UserChanges {
            username: Some("countess".to_string()),
            ..Default::default()
        };
        assert!(UserStore::update(&store, ada, &rename).await.unwrap());
        let stored = store.find_by_id(ada).await.unwrap().unwrap();
        assert_eq!(stored.username, "countess");

        assert!(!UserStore::update(&store, Uuid::new_v4(), &rename).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_search_is_case_insensitive() {
        let store = MemoryStore::new();
        seed_user(&store, "ada").await;
        seed_user(&store, "bob").await;

        assert_eq!(UserStore::search(&store, "LOVE").await.unwrap().len(), 2);
        assert_eq!(UserStore::search(&store, "bo").await.unwrap().len(), 1);
        assert_eq!(UserStore::search(&store, "").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_like_flips_membership() {
        let store = MemoryStore::new();
        let author = seed_user(&store, "author").await;
        let user = seed_user(&store, "fan").await;
        let blog = seed_blog(&store, author, "t", vec![]).await;

        assert_eq!(store.toggle_like(blog.id, user).await.unwrap(), Some(true));
        assert_eq!(stored_blog(&store, blog.id).await.unwrap().likes.count(), 1);
        assert_eq!(store.toggle_like(blog.id, user).await.unwrap(), Some(false));
        assert_eq!(stored_blog(&store, blog.id).await.unwrap().likes.count(), 0);
        assert_eq!(store.toggle_like(Uuid::new_v4(), user).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_writes_from_unknown_user_are_rejected() {
        let store = MemoryStore::new();
        let author = seed_user(&store, "author").await;
        let blog = seed_blog(&store, author, "t", vec![]).await;
        let ghost = Uuid::new_v4();

        let err = BlogStore::insert(&store, new_blog(ghost, "orphan", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownUser);
        assert_eq!(
            store.toggle_like(blog.id, ghost).await.unwrap_err(),
            StoreError::UnknownUser
        );
        assert_eq!(
            store.add_comment(blog.id, ghost, "boo").await.unwrap_err(),
            StoreError::UnknownUser
        );

        // a missing blog is reported before the missing user
        assert_eq!(store.toggle_like(Uuid::new_v4(), ghost).await.unwrap(), None);

        let stored = stored_blog(&store, blog.id).await.unwrap();
        assert_eq!(stored.likes.count(), 0);
        assert!(stored.comments.is_empty());
        assert_eq!(BlogStore::search(&store, None, "").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blog_update_and_delete_are_author_scoped() {
        let store = MemoryStore::new();
        let author = seed_user(&store, "author").await;
        let blog = seed_blog(&store, author, "mine", vec![]).await;
        let changes = BlogChanges {
            body: Some("edited".to_string()),
            ..Default::default()
        };

        assert!(!BlogStore::update(&store, blog.id, Uuid::new_v4(), &changes)
            .await
            .unwrap());
        assert!(BlogStore::update(&store, blog.id, author, &changes).await.unwrap());
        assert_eq!(stored_blog(&store, blog.id).await.unwrap().body, "edited");

        assert!(!BlogStore::delete(&store, blog.id, Uuid::new_v4()).await.unwrap());
        assert!(BlogStore::delete(&store, blog.id, author).await.unwrap());
        assert!(stored_blog(&store, blog.id).await.is_none());
    }

    #[tokio::test]
    async fn test_blog_search_and_recommendation() {
        let store = MemoryStore::new();
        let author = seed_user(&store, "author").await;
        let traveller = seed_user(&store, "traveller").await;
        seed_blog(&store, author, "Rust tips", vec![Preference::Tech]).await;
        seed_blog(&store, traveller, "Paris", vec![Preference::Travel]).await;

        assert_eq!(BlogStore::search(&store, None, "rust").await.unwrap().len(), 1);
        assert_eq!(BlogStore::search(&store, None, "TRAV").await.unwrap().len(), 1);
        assert_eq!(BlogStore::search(&store, None, "").await.unwrap().len(), 2);
        assert_eq!(BlogStore::search(&store, Some(author), "").await.unwrap().len(), 1);
        assert_eq!(
            BlogStore::search(&store, Some(author), "paris").await.unwrap().len(),
            0
        );

        let picks = store
            .recommended(&[Preference::Travel, Preference::Food])
            .await
            .unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].title, "Paris");
    }

    #[tokio::test]
    async fn test_user_delete_cascades() {
        let store = MemoryStore::new();
        let ada = seed_user(&store, "ada").await;
        let bob = seed_user(&store, "bob").await;
        let own = seed_blog(&store, ada, "own", vec![]).await;
        let other = seed_blog(&store, bob, "other", vec![]).await;
        store.toggle_like(other.id, ada).await.unwrap();
        store.add_comment(other.id, ada, "hi").await.unwrap();

        assert!(UserStore::delete(&store, ada).await.unwrap());
        assert!(stored_blog(&store, own.id).await.is_none());
        let other = stored_blog(&store, other.id).await.unwrap();
        assert_eq!(other.likes.count(), 0);
        assert!(other.comments.is_empty());
        assert!(!UserStore::delete(&store, ada).await.unwrap());
    }

    #[tokio::test]
    async fn test_comments_append_in_order() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "ada").await;
        let blog = seed_blog(&store, user, "t", vec![]).await;
        assert!(store.add_comment(blog.id, user, "first").await.unwrap());
        assert!(store.add_comment(blog.id, user, "second").await.unwrap());
        assert!(!store.add_comment(Uuid::new_v4(), user, "lost").await.unwrap());

        let messages: Vec<_> = stored_blog(&store, blog.id)
            .await
            .unwrap()
            .comments
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}

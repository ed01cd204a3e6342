//! PostgreSQL adapter tests
//!
//! These run against the database named by `DATABASE_URL` and return early
//! when it is unset. Every test works on rows tagged with a fresh suffix, so
//! they can share one database and run in parallel.

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

use quillpost::backend::store::{
    BlogStore, NewBlog, NewUser, PgBlogStore, PgUserStore, StoreError, UserChanges, UserConflict,
    UserStore,
};
use quillpost::shared::{Blog, FullName, Preference};

/// Connect and migrate, or `None` when no database is configured
async fn test_pool() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
            return None;
        }
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        name: FullName {
            first: "Pg".to_string(),
            last: "Test".to_string(),
        },
        email: format!("{}@t.io", username),
        password_hash: "digest".to_string(),
        preferences: vec![Preference::Tech, Preference::Music, Preference::Art],
    }
}

async fn seed_user(users: &PgUserStore, username: &str) -> Uuid {
    users.insert(new_user(username)).await.unwrap().id
}

fn new_blog(author: Uuid, title: &str) -> NewBlog {
    NewBlog {
        author,
        title: title.to_string(),
        body: format!("Body of {}", title),
        tags: vec![Preference::Tech],
    }
}

async fn stored_blog(blogs: &PgBlogStore, id: Uuid) -> Option<Blog> {
    blogs
        .search(None, "")
        .await
        .unwrap()
        .into_iter()
        .find(|blog| blog.id == id)
}

#[tokio::test]
async fn test_user_conflicts_and_duplicates() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool);
    let sfx = suffix();
    let ada = format!("ada{}", sfx);
    seed_user(&users, &ada).await;

    let ada_email = format!("{}@t.io", ada);
    let other = format!("x{}@t.io", sfx);
    assert_eq!(
        users.find_conflict(&ada, &other).await.unwrap(),
        Some(UserConflict::Username)
    );
    assert_eq!(
        users.find_conflict(&format!("bob{}", sfx), &ada_email).await.unwrap(),
        Some(UserConflict::Email)
    );
    assert_eq!(
        users.find_conflict(&format!("bob{}", sfx), &other).await.unwrap(),
        None
    );

    let mut same_username = new_user(&ada);
    same_username.email = other.clone();
    assert_eq!(
        users.insert(same_username).await.unwrap_err(),
        StoreError::duplicate("username")
    );

    let mut same_email = new_user(&format!("bob{}", sfx));
    same_email.email = ada_email.clone();
    assert_eq!(
        users.insert(same_email).await.unwrap_err(),
        StoreError::duplicate("email")
    );
}

#[tokio::test]
async fn test_update_to_taken_email_is_duplicate() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    seed_user(&users, &format!("bob{}", sfx)).await;

    let changes = UserChanges {
        email: Some(format!("bob{}@t.io", sfx)),
        ..UserChanges::default()
    };
    assert_eq!(
        users.update(ada, &changes).await.unwrap_err(),
        StoreError::duplicate("email")
    );

    let changes = UserChanges {
        last_name: Some("Lovelace".to_string()),
        ..UserChanges::default()
    };
    assert!(users.update(ada, &changes).await.unwrap());
    let stored = users.find_by_id(ada).await.unwrap().unwrap();
    assert_eq!(stored.name.last, "Lovelace");
    assert!(!users.update(Uuid::new_v4(), &changes).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_title_is_rejected() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = PgBlogStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    let bob = seed_user(&users, &format!("bob{}", sfx)).await;
    let title = format!("Rust ownership {}", sfx);

    blogs.insert(new_blog(ada, &title)).await.unwrap();
    assert!(blogs.title_exists(&title).await.unwrap());
    assert_eq!(
        blogs.insert(new_blog(bob, &title)).await.unwrap_err(),
        StoreError::duplicate("title")
    );
}

#[tokio::test]
async fn test_like_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = PgBlogStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    let bob = seed_user(&users, &format!("bob{}", sfx)).await;
    let blog = blogs.insert(new_blog(ada, &format!("Liked {}", sfx))).await.unwrap();

    assert_eq!(blogs.toggle_like(blog.id, bob).await.unwrap(), Some(true));
    let stored = stored_blog(&blogs, blog.id).await.unwrap();
    assert_eq!(stored.likes.count(), 1);

    assert_eq!(blogs.toggle_like(blog.id, bob).await.unwrap(), Some(false));
    let stored = stored_blog(&blogs, blog.id).await.unwrap();
    assert_eq!(stored.likes.count(), 0);

    assert_eq!(blogs.toggle_like(Uuid::new_v4(), bob).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_not_lost() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = Arc::new(PgBlogStore::new(pool));
    let sfx = suffix();
    let author = seed_user(&users, &format!("au{}", sfx)).await;
    let blog = blogs.insert(new_blog(author, &format!("Popular {}", sfx))).await.unwrap().id;

    let mut handles = Vec::new();
    for i in 0..12 {
        let fan = seed_user(&users, &format!("f{}{}", i, sfx)).await;
        let blogs = Arc::clone(&blogs);
        handles.push(tokio::spawn(async move {
            blogs.toggle_like(blog, fan).await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Some(true));
    }

    assert_eq!(stored_blog(&blogs, blog).await.unwrap().likes.count(), 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_comments_all_land() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = Arc::new(PgBlogStore::new(pool));
    let sfx = suffix();
    let author = seed_user(&users, &format!("au{}", sfx)).await;
    let blog = blogs.insert(new_blog(author, &format!("Chatty {}", sfx))).await.unwrap().id;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let blogs = Arc::clone(&blogs);
            tokio::spawn(async move {
                blogs
                    .add_comment(blog, author, &format!("comment {}", i))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(stored_blog(&blogs, blog).await.unwrap().comments.len(), 16);

    assert!(!blogs.add_comment(Uuid::new_v4(), author, "lost").await.unwrap());
}

#[tokio::test]
async fn test_comments_keep_insertion_order() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = PgBlogStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    let bob = seed_user(&users, &format!("bob{}", sfx)).await;
    let blog = blogs.insert(new_blog(ada, &format!("Ordered {}", sfx))).await.unwrap();

    assert!(blogs.add_comment(blog.id, bob, "First!").await.unwrap());
    assert!(blogs.add_comment(blog.id, ada, "Thanks").await.unwrap());

    let comments = stored_blog(&blogs, blog.id).await.unwrap().comments;
    let thread: Vec<_> = comments
        .iter()
        .map(|comment| (comment.user, comment.message.as_str()))
        .collect();
    assert_eq!(thread, vec![(bob, "First!"), (ada, "Thanks")]);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = PgBlogStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    blogs.insert(new_blog(ada, &format!("100% rye {}", sfx))).await.unwrap();
    blogs.insert(new_blog(ada, &format!("1000 rye {}", sfx))).await.unwrap();

    let found = blogs.search(None, &format!("0% RYE {}", sfx)).await.unwrap();
    let titles: Vec<_> = found.iter().map(|blog| blog.title.clone()).collect();
    assert_eq!(titles, vec![format!("100% rye {}", sfx)]);

    let mine = blogs.search(Some(ada), "").await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn test_deleted_user_cannot_write() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserStore::new(pool.clone());
    let blogs = PgBlogStore::new(pool);
    let sfx = suffix();
    let ada = seed_user(&users, &format!("ada{}", sfx)).await;
    let bob = seed_user(&users, &format!("bob{}", sfx)).await;
    let ada_blog = blogs.insert(new_blog(ada, &format!("Gone {}", sfx))).await.unwrap();
    let bob_blog = blogs.insert(new_blog(bob, &format!("Stays {}", sfx))).await.unwrap();
    assert!(blogs.add_comment(bob_blog.id, ada, "nice").await.unwrap());

    assert!(users.delete(ada).await.unwrap());
    assert!(stored_blog(&blogs, ada_blog.id).await.is_none());
    assert!(stored_blog(&blogs, bob_blog.id).await.unwrap().comments.is_empty());

    assert_matches!(
        blogs.insert(new_blog(ada, &format!("Ghost {}", sfx))).await,
        Err(StoreError::UnknownUser)
    );
    assert_matches!(
        blogs.toggle_like(bob_blog.id, ada).await,
        Err(StoreError::UnknownUser)
    );
    assert_matches!(
        blogs.add_comment(bob_blog.id, ada, "still here").await,
        Err(StoreError::UnknownUser)
    );
    assert!(!users.delete(ada).await.unwrap());
}

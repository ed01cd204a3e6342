/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The user and blog stores (trait objects, so the adapter is chosen at start-up)
 * - The token service carrying the signing secret
 * - The password hasher and its cost
 *
 * Everything in here is immutable after start-up and cheap to clone, so
 * requests never contend on application state.
 *
 * # Example
 *
 * ```rust,no_run
 * use quillpost::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let users = state.users.search("").await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::store::{BlogStore, MemoryStore, UserStore};

/// Shared handle to the user store
pub type Users = Arc<dyn UserStore>;

/// Shared handle to the blog store
pub type Blogs = Arc<dyn BlogStore>;

#[derive(Clone)]
pub struct AppState {
    /// User directory
    pub users: Users,

    /// Blog store
    pub blogs: Blogs,

    /// Issues and verifies bearer tokens
    pub tokens: TokenService,

    /// Hashes and verifies passwords
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(
        users: Users,
        blogs: Blogs,
        tokens: TokenService,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            users,
            blogs,
            tokens,
            passwords,
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory(tokens: TokenService, passwords: PasswordHasher) -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store),
            tokens,
            passwords,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("passwords", &self.passwords)
            .finish_non_exhaustive()
    }
}

impl FromRef<AppState> for Users {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Blogs {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.blogs.clone()
    }
}

/// Implement FromRef for TokenService
///
/// Used by the authentication gate, which needs nothing else from the state.
impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords
    }
}

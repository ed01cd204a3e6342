/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Build the token service and password hasher from configuration
 * 2. Load the database if one is configured
 * 3. Pick the PostgreSQL or in-memory store
 * 4. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, AppConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{PgBlogStore, PgUserStore};

/// Build the application state described by `config`
pub async fn build_state(config: &AppConfig) -> AppState {
    let tokens = TokenService::new(&config.jwt_secret);
    let passwords = PasswordHasher::new(config.bcrypt_cost);

    match load_database(config.database_url.as_deref()).await {
        Some(pool) => {
            tracing::info!("Using PostgreSQL store");
            AppState::new(
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgBlogStore::new(pool)),
                tokens,
                passwords,
            )
        }
        None => {
            tracing::info!("Using in-memory store");
            AppState::in_memory(tokens, passwords)
        }
    }
}

/// Create and configure the Axum application
///
/// The server never fails to start because of the database: without one
/// it serves from the in-memory store.
pub async fn create_app(config: &AppConfig) -> Router<()> {
    tracing::info!("Initializing blog backend server");

    let app_state = build_state(config).await;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}

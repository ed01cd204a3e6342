/**
 * Quillpost Server Entry Point
 *
 * This is the main entry point for the blog backend server.
 * It loads configuration, initializes tracing and serves the Axum app.
 */

use quillpost::backend::server::{config::AppConfig, create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Server initialization started");

    let config = AppConfig::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let app = create_app(&config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

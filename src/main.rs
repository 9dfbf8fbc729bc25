use anyhow::{Context, Result};
use axum::{routing::get, Router};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod ingest;
mod services;
mod state;
mod storage;
mod templates;
mod validate;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ritual=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RITUAL...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    // Initialize application state (vendor clients come up only when
    // their credentials are configured)
    let state = AppState::new(db, config.clone());

    // Build application routes
    let app = create_router(state);

    // Start server
    let addr = bind_addr(&config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn bind_addr(config: &Config) -> Result<SocketAddr> {
    format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .with_context(|| format!("Invalid server address {}:{}", config.server_host, config.server_port))
}

fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // API routes (JSON)
        .nest("/api", handlers::api_routes())

        // HTML routes (Maud + HTMX)
        .merge(handlers::html_routes())

        // Static assets
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(host: &str, port: u16) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: host.to_string(),
            server_port: port,
            storage_base_url: None,
            photo_bucket: "photos".to_string(),
            avatar_bucket: "avatars".to_string(),
            spotify_client_id: None,
            spotify_client_secret: None,
            lastfm_api_key: None,
            ticketmaster_api_key: None,
            setlistfm_api_key: None,
            bandsintown_app_id: None,
        }
    }

    #[test]
    fn listener_uses_the_configured_host() {
        let addr = bind_addr(&config_for("127.0.0.1", 8080)).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn bad_host_is_an_error() {
        assert!(bind_addr(&config_for("not a host", 8080)).is_err());
    }
}

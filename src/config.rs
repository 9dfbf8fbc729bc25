use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

/// Application configuration. Every vendor credential is optional and
/// checked independently before the matching integration is enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub storage_base_url: Option<String>,
    pub photo_bucket: String,
    pub avatar_bucket: String,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub lastfm_api_key: Option<String>,
    pub ticketmaster_api_key: Option<String>,
    pub setlistfm_api_key: Option<String>,
    pub bandsintown_app_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            storage_base_url: env::var("STORAGE_BASE_URL").ok(),
            photo_bucket: env::var("PHOTO_BUCKET")
                .unwrap_or_else(|_| "event-photos".to_string()),
            avatar_bucket: env::var("AVATAR_BUCKET")
                .unwrap_or_else(|_| "avatars".to_string()),
            spotify_client_id: env::var("SPOTIFY_CLIENT_ID").ok(),
            spotify_client_secret: env::var("SPOTIFY_CLIENT_SECRET").ok(),
            lastfm_api_key: env::var("LASTFM_API_KEY").ok(),
            ticketmaster_api_key: env::var("TICKETMASTER_API_KEY").ok(),
            setlistfm_api_key: env::var("SETLISTFM_API_KEY").ok(),
            bandsintown_app_id: env::var("BANDSINTOWN_APP_ID").ok(),
        })
    }

    /// Spotify needs both halves of the client-credentials pair.
    pub fn spotify_credentials(&self) -> Option<(&str, &str)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

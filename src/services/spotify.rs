use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use governor::{
    clock::DefaultClock, state::direct::NotKeyed, state::InMemoryState, Quota, RateLimiter,
};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Spotify Web API client using the Client Credentials flow. The access
/// token is cached inside the service and refreshed shortly before it
/// expires.
#[derive(Clone)]
pub struct SpotifyService {
    client: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    api_base: String,
    token: Arc<Mutex<Option<CachedToken>>>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    pub height: Option<i32>,
    pub width: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    artists: ArtistSearchPage,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchPage {
    #[serde(default)]
    items: Vec<SpotifyArtist>,
}

impl SpotifyArtist {
    /// Largest available artist image, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

impl SpotifyService {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            SPOTIFY_TOKEN_URL.to_string(),
            SPOTIFY_API_BASE.to_string(),
        )
    }

    /// Constructor with overridable endpoints, used by tests that point
    /// the client at a mock server.
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        token_url: String,
        api_base: String,
    ) -> Self {
        // 2 requests per second stays under Spotify's ~3 req/sec limit
        let quota = Quota::per_second(nonzero!(2u32));

        Self {
            client: Client::new(),
            client_id,
            client_secret,
            token_url,
            api_base,
            token: Arc::new(Mutex::new(None)),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Get a valid access token, requesting a new one when the cached
    /// token is missing or about to expire.
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        self.rate_limiter.until_ready().await;

        let basic = general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .client
            .post(&self.token_url)
            .header("Authorization", format!("Basic {}", basic))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Spotify token request failed with status {}", status);
            return Err(AppError::ExternalApi(format!(
                "Spotify authentication failed ({})",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;

        // Renew a minute early so in-flight requests never race expiry.
        let expires_at = Utc::now() + Duration::seconds(token.expires_in - 60);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });

        tracing::debug!("Obtained new Spotify access token");
        Ok(access_token)
    }

    /// Search for an artist by name, returning the best match.
    pub async fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>> {
        let token = self.access_token().await?;

        self.rate_limiter.until_ready().await;

        let url = format!(
            "{}/search?q={}&type=artist&limit=1",
            self.api_base,
            urlencoding::encode(name)
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Spotify API error ({})",
                status
            )));
        }

        let data: ArtistSearchResponse = response.json().await?;
        Ok(data.artists.items.into_iter().next())
    }
}

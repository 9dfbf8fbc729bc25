use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::ingest::normalizer::LastfmEvent;

const LASTFM_API_BASE: &str = "https://ws.audioscrobbler.com/2.0";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Last.fm client. The API key travels as a query parameter on every
/// request; responses are best-effort shaped, so every field is optional.
#[derive(Clone)]
pub struct LastfmService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastfmArtistInfo {
    pub name: String,
    pub bio_summary: Option<String>,
    pub tags: Vec<String>,
    pub listeners: Option<u64>,
    pub playcount: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ArtistInfoResponse {
    artist: Option<RawArtist>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    name: String,
    bio: Option<RawBio>,
    tags: Option<RawTags>,
    stats: Option<RawStats>,
}

#[derive(Debug, Deserialize)]
struct RawBio {
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    #[serde(default)]
    tag: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    listeners: Option<String>,
    playcount: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistEventsResponse {
    #[serde(default)]
    events: Vec<LastfmEvent>,
}

impl LastfmService {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, LASTFM_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// `artist.getinfo`: bio summary, tags, and listening stats.
    pub async fn artist_info(&self, name: &str) -> Result<Option<LastfmArtistInfo>> {
        let url = format!(
            "{}/?method=artist.getinfo&artist={}&api_key={}&format=json",
            self.base_url,
            urlencoding::encode(name),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Last.fm API error ({})",
                status
            )));
        }

        let data: ArtistInfoResponse = response.json().await?;

        Ok(data.artist.map(|raw| LastfmArtistInfo {
            name: raw.name,
            bio_summary: raw.bio.and_then(|b| b.summary),
            tags: raw
                .tags
                .map(|t| t.tag.into_iter().map(|t| t.name).collect())
                .unwrap_or_default(),
            listeners: raw
                .stats
                .as_ref()
                .and_then(|s| s.listeners.as_deref())
                .and_then(|s| s.parse().ok()),
            playcount: raw
                .stats
                .as_ref()
                .and_then(|s| s.playcount.as_deref())
                .and_then(|s| s.parse().ok()),
        }))
    }

    /// Upcoming events for an artist. Dates in this feed are free text;
    /// the normalizer handles the parsing and the past-event filter.
    pub async fn artist_events(&self, name: &str) -> Result<Vec<LastfmEvent>> {
        let url = format!(
            "{}/?method=artist.getevents&artist={}&api_key={}&format=json",
            self.base_url,
            urlencoding::encode(name),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Last.fm API error ({})",
                status
            )));
        }

        let data: ArtistEventsResponse = response.json().await?;
        tracing::debug!("Last.fm returned {} events for {}", data.events.len(), name);
        Ok(data.events)
    }
}

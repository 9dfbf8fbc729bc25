use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::ingest::normalizer::Setlist;

const SETLISTFM_API_BASE: &str = "https://api.setlist.fm/rest/1.0";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Setlist.fm client; the API key travels in the `x-api-key` header.
#[derive(Clone)]
pub struct SetlistFmService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SetlistSearchResponse {
    #[serde(default)]
    setlist: Vec<Setlist>,
}

impl SetlistFmService {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, SETLISTFM_API_BASE.to_string())
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

    /// Past setlists for an artist, newest first (vendor ordering).
    pub async fn artist_setlists(&self, artist_name: &str) -> Result<Vec<Setlist>> {
        let url = format!(
            "{}/search/setlists?artistName={}",
            self.base_url,
            urlencoding::encode(artist_name)
        );

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        // 404 is how setlist.fm reports "no setlists for this artist".
        if response.status().as_u16() == 404 {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Setlist.fm API error ({})",
                status
            )));
        }

        let data: SetlistSearchResponse = response.json().await?;
        tracing::debug!(
            "Setlist.fm returned {} setlists for {}",
            data.setlist.len(),
            artist_name
        );
        Ok(data.setlist)
    }
}

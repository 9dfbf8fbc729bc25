use reqwest::Client;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::ingest::normalizer::BandsintownEvent;

const BANDSINTOWN_API_BASE: &str = "https://rest.bandsintown.com";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Bandsintown client; `app_id` query-param auth. Its payload is already
/// the closest to the canonical event shape.
#[derive(Clone)]
pub struct BandsintownService {
    client: Client,
    app_id: String,
    base_url: String,
}

impl BandsintownService {
    pub fn new(app_id: String) -> Self {
        Self::with_base_url(app_id, BANDSINTOWN_API_BASE.to_string())
    }

    pub fn with_base_url(app_id: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            app_id,
            base_url,
        }
    }

    /// Upcoming events for one artist.
    pub async fn artist_events(&self, artist_name: &str) -> Result<Vec<BandsintownEvent>> {
        let url = format!(
            "{}/artists/{}/events?app_id={}",
            self.base_url,
            urlencoding::encode(artist_name),
            self.app_id
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Bandsintown API error ({})",
                status
            )));
        }

        let events: Vec<BandsintownEvent> = response.json().await?;
        tracing::debug!(
            "Bandsintown returned {} events for {}",
            events.len(),
            artist_name
        );
        Ok(events)
    }
}

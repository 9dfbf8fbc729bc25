use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::ingest::normalizer::TicketmasterEvent;

const TICKETMASTER_API_BASE: &str = "https://app.ticketmaster.com/discovery/v2";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Ticketmaster Discovery client; `apikey` query-param auth.
#[derive(Clone)]
pub struct TicketmasterService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    /// Absent entirely when the search has no results.
    #[serde(rename = "_embedded")]
    embedded: Option<DiscoveryEmbedded>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryEmbedded {
    #[serde(default)]
    events: Vec<TicketmasterEvent>,
}

impl TicketmasterService {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, TICKETMASTER_API_BASE.to_string())
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

    /// Search events by artist keyword and/or city. Either filter may be
    /// omitted; an empty search returns whatever Discovery ranks first.
    pub async fn search_events(
        &self,
        keyword: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<TicketmasterEvent>> {
        let mut url = format!("{}/events.json?apikey={}&size=20", self.base_url, self.api_key);

        if let Some(keyword) = keyword {
            url.push_str(&format!("&keyword={}", urlencoding::encode(keyword)));
        }
        if let Some(city) = city {
            url.push_str(&format!("&city={}", urlencoding::encode(city)));
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Ticketmaster API error ({})",
                status
            )));
        }

        let data: DiscoveryResponse = response.json().await?;
        let events = data.embedded.map(|e| e.events).unwrap_or_default();

        tracing::debug!("Ticketmaster returned {} events", events.len());
        Ok(events)
    }
}

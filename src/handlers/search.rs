use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::UserContext,
    error::{AppError, Result},
    ingest::normalizer::{self, CanonicalEvent},
    state::AppState,
};

#[derive(Deserialize)]
pub struct SearchEventsQuery {
    pub artist: Option<String>,
    pub city: Option<String>,
}

#[derive(Serialize)]
pub struct SearchEventsResponse {
    pub events: Vec<CanonicalEvent>,
    /// One note per vendor that was unconfigured or failed; results from
    /// the other vendors are still returned.
    pub notes: Vec<String>,
}

/// Concurrent Ticketmaster + Bandsintown search. The arms are joined with
/// all-settled semantics: one vendor failing degrades its contribution to
/// an explanatory note instead of aborting the other's results.
pub async fn search_events(
    State(state): State<AppState>,
    _user: UserContext,
    Query(query): Query<SearchEventsQuery>,
) -> Result<Json<SearchEventsResponse>> {
    let artist = query.artist.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let city = query.city.as_deref().map(str::trim).filter(|s| !s.is_empty());

    if artist.is_none() && city.is_none() {
        return Err(AppError::Validation(
            "Provide an artist or a city to search".to_string(),
        ));
    }

    let ticketmaster_lookup = async {
        match &state.ticketmaster {
            Some(service) => service.search_events(artist, city).await.map(Some),
            None => Ok(None),
        }
    };
    let bandsintown_lookup = async {
        match (&state.bandsintown, artist) {
            (Some(service), Some(artist)) => service.artist_events(artist).await.map(Some),
            _ => Ok(None),
        }
    };

    let (tm_result, bit_result) = tokio::join!(ticketmaster_lookup, bandsintown_lookup);

    let mut events = Vec::new();
    let mut notes = Vec::new();

    match tm_result {
        Ok(Some(found)) => {
            events.extend(found.iter().map(normalizer::normalize_ticketmaster));
        }
        Ok(None) => notes.push("Ticketmaster is not configured".to_string()),
        Err(e) => {
            tracing::warn!("Ticketmaster search failed: {}", e);
            notes.push("Ticketmaster search failed".to_string());
        }
    }

    match bit_result {
        Ok(Some(found)) => {
            events.extend(found.iter().map(normalizer::normalize_bandsintown));
        }
        Ok(None) => {
            if state.bandsintown.is_none() {
                notes.push("Bandsintown is not configured".to_string());
            }
        }
        Err(e) => {
            tracing::warn!("Bandsintown search failed: {}", e);
            notes.push("Bandsintown search failed".to_string());
        }
    }

    Ok(Json(SearchEventsResponse { events, notes }))
}

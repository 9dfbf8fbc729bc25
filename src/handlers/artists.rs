use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{artists, events, lineups},
    error::{AppError, Result},
    ingest::normalizer::{flatten_songs, Setlist},
    services::lastfm::LastfmArtistInfo,
    services::spotify::SpotifyArtist,
    state::AppState,
    validate::{normalize_name, optional_text, sanitize_text, MAX_CITY_LEN, MAX_NAME_LEN, MAX_URL_LEN},
};

#[derive(Deserialize)]
pub struct ListArtistsQuery {
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    50
}

#[derive(Serialize)]
pub struct ArtistSummary {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize)]
pub struct PaginatedArtistsResponse {
    pub artists: Vec<ArtistSummary>,
    pub pagination: PaginationInfo,
}

#[derive(Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

pub async fn list_artists(
    State(state): State<AppState>,
    _user: UserContext,
    Query(query): Query<ListArtistsQuery>,
) -> Result<Json<PaginatedArtistsResponse>> {
    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, 200);

    let mut select = artists::Entity::find();

    if let Some(search) = &query.search {
        if !search.is_empty() {
            select = select.filter(
                artists::Column::NameNormalized.contains(&normalize_name(search)),
            );
        }
    }

    let total_items = select.clone().count(&state.db).await?;
    let total_pages = total_items.div_ceil(page_size);

    let rows = select
        .order_by_asc(artists::Column::NameNormalized)
        .paginate(&state.db, page_size)
        .fetch_page(page - 1)
        .await?;

    Ok(Json(PaginatedArtistsResponse {
        artists: rows
            .into_iter()
            .map(|a| ArtistSummary {
                id: a.id,
                name: a.name,
                genre: a.genre,
                image_url: a.image_url,
            })
            .collect(),
        pagination: PaginationInfo {
            page,
            page_size,
            total_items,
            total_pages,
        },
    }))
}

#[derive(Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub genre: Option<String>,
}

pub async fn create_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Json(payload): Json<CreateArtistRequest>,
) -> Result<(StatusCode, Json<artists::Model>)> {
    let name = sanitize_text(&payload.name, MAX_NAME_LEN);
    if name.is_empty() {
        return Err(AppError::Validation("Artist name is required".to_string()));
    }

    let artist = crate::ingest::resolver::find_or_create_artist(&state.db, &name).await?;

    // The form may carry a genre; fill it in when the row has none yet.
    let genre = optional_text(payload.genre.as_deref(), MAX_CITY_LEN);
    let artist = if artist.genre.is_none() && genre.is_some() {
        let mut active: artists::ActiveModel = artist.into();
        active.genre = Set(genre);
        active.updated_at = Set(Utc::now().into());
        active.update(&state.db).await?
    } else {
        artist
    };

    Ok((StatusCode::CREATED, Json(artist)))
}

#[derive(Serialize)]
pub struct ArtistDetailResponse {
    pub artist: ArtistSummary,
    pub spotify_id: Option<String>,
    pub events: Vec<ArtistEventResponse>,
}

#[derive(Serialize)]
pub struct ArtistEventResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub date: chrono::DateTime<Utc>,
}

pub async fn get_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistDetailResponse>> {
    let artist = artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let event_ids: Vec<Uuid> = lineups::Entity::find()
        .filter(lineups::Column::ArtistId.eq(id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|l| l.event_id)
        .collect();

    let artist_events = events::Entity::find()
        .filter(events::Column::Id.is_in(event_ids))
        .order_by_desc(events::Column::Date)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|e| ArtistEventResponse {
            id: e.id,
            name: e.name,
            date: e.date.with_timezone(&Utc),
        })
        .collect();

    Ok(Json(ArtistDetailResponse {
        artist: ArtistSummary {
            id: artist.id,
            name: artist.name,
            genre: artist.genre,
            image_url: artist.image_url,
        },
        spotify_id: artist.spotify_id,
        events: artist_events,
    }))
}

#[derive(Deserialize)]
pub struct UpdateArtistRequest {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

pub async fn update_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArtistRequest>,
) -> Result<Json<artists::Model>> {
    let artist = artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let mut active: artists::ActiveModel = artist.into();

    if let Some(name) = payload.name {
        let name = sanitize_text(&name, MAX_NAME_LEN);
        if name.is_empty() {
            return Err(AppError::Validation("Artist name cannot be empty".to_string()));
        }
        active.name_normalized = Set(normalize_name(&name));
        active.name = Set(name);
    }
    if let Some(genre) = payload.genre {
        active.genre = Set(optional_text(Some(&genre), MAX_CITY_LEN));
    }
    if let Some(url) = payload.image_url {
        active.image_url = Set(optional_text(Some(&url), MAX_URL_LEN));
    }
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

/// Artists referenced by a lineup cannot be deleted; they are shared rows.
pub async fn delete_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let referenced = lineups::Entity::find()
        .filter(lineups::Column::ArtistId.eq(id))
        .count(&state.db)
        .await?;
    if referenced > 0 {
        return Err(AppError::Validation(
            "Artist is on an event lineup and cannot be deleted".to_string(),
        ));
    }

    artists::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct EnrichArtistResponse {
    pub spotify: Option<SpotifyArtist>,
    pub lastfm: Option<LastfmArtistInfo>,
    /// One note per vendor that was unconfigured or failed.
    pub notes: Vec<String>,
}

/// Concurrent Spotify + Last.fm enrichment. Each vendor degrades
/// independently: a failure or missing credential contributes a note,
/// never an error response.
pub async fn enrich_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichArtistResponse>> {
    let artist = artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let spotify_lookup = async {
        match &state.spotify {
            Some(service) => service.search_artist(&artist.name).await.map(Some),
            None => Ok(None),
        }
    };
    let lastfm_lookup = async {
        match &state.lastfm {
            Some(service) => service.artist_info(&artist.name).await.map(Some),
            None => Ok(None),
        }
    };

    let (spotify_result, lastfm_result) = tokio::join!(spotify_lookup, lastfm_lookup);

    let mut notes = Vec::new();

    let spotify = match spotify_result {
        Ok(Some(found)) => found,
        Ok(None) => {
            if state.spotify.is_none() {
                notes.push("Spotify is not configured".to_string());
            }
            None
        }
        Err(e) => {
            tracing::warn!("Spotify enrichment failed: {}", e);
            notes.push("Spotify lookup failed".to_string());
            None
        }
    };

    let lastfm = match lastfm_result {
        Ok(Some(found)) => found,
        Ok(None) => {
            if state.lastfm.is_none() {
                notes.push("Last.fm is not configured".to_string());
            }
            None
        }
        Err(e) => {
            tracing::warn!("Last.fm enrichment failed: {}", e);
            notes.push("Last.fm lookup failed".to_string());
            None
        }
    };

    // Persist the Spotify image and id on first sight.
    if let Some(found) = &spotify {
        if artist.spotify_id.is_none() {
            let mut active: artists::ActiveModel = artist.into();
            active.spotify_id = Set(Some(found.id.clone()));
            if let Some(url) = found.image_url() {
                active.image_url = Set(optional_text(Some(url), MAX_URL_LEN));
            }
            active.updated_at = Set(Utc::now().into());
            active.update(&state.db).await?;
        }
    }

    Ok(Json(EnrichArtistResponse {
        spotify,
        lastfm,
        notes,
    }))
}

#[derive(Serialize)]
pub struct SetlistResponse {
    pub id: Option<String>,
    pub event_date: Option<String>,
    pub venue_name: Option<String>,
    pub songs: Vec<String>,
    pub url: Option<String>,
}

pub async fn get_setlists(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SetlistResponse>>> {
    let artist = artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let service = state
        .setlistfm
        .as_ref()
        .ok_or_else(|| AppError::ExternalApi("Setlist.fm is not configured".to_string()))?;

    let setlists = service.artist_setlists(&artist.name).await?;

    Ok(Json(
        setlists
            .iter()
            .map(|s: &Setlist| SetlistResponse {
                id: s.id.clone(),
                event_date: s.event_date.clone(),
                venue_name: s.venue.as_ref().and_then(|v| v.name.clone()),
                songs: flatten_songs(s),
                url: s.url.clone(),
            })
            .collect(),
    ))
}

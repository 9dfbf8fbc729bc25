use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{attendances, event_photos, events, lineups, memories, venues},
    db::enums::AttendanceStatus,
    error::{AppError, Result},
    ingest::{self, normalizer::CanonicalEvent},
    services::{attendance, events as event_service},
    state::AppState,
    storage,
    validate::{optional_text, MAX_CAPTION_LEN},
};

use super::artists::ArtistSummary;

#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<String>,
    pub year: Option<i32>,
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
pub struct EventResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub source: String,
    pub source_url: Option<String>,
    pub venue: Option<VenueSummary>,
    pub attendance_status: Option<String>,
}

#[derive(Serialize)]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Serialize)]
pub struct EventDetailResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub source: String,
    pub source_url: Option<String>,
    pub venue: Option<VenueSummary>,
    pub lineup: Vec<ArtistSummary>,
    pub attendance_status: Option<String>,
    pub memory: Option<MemoryResponse>,
    pub photos: Vec<PhotoResponse>,
}

#[derive(Serialize)]
pub struct MemoryResponse {
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub caption: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct PaginatedEventsResponse {
    pub events: Vec<EventResponse>,
    pub pagination: PaginationInfo,
}

#[derive(Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

pub async fn list_events(
    State(state): State<AppState>,
    user: UserContext,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<PaginatedEventsResponse>> {
    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, 200);

    let mut select = events::Entity::find();

    // A status filter narrows to events the user has an attendance on.
    if let Some(status) = &query.status {
        let status = AttendanceStatus::from_str(status)
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", status)))?;
        let event_ids: Vec<Uuid> = attendances::Entity::find()
            .filter(attendances::Column::UserId.eq(user.user_id))
            .filter(attendances::Column::Status.eq(status.as_str()))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|a| a.event_id)
            .collect();
        select = select.filter(events::Column::Id.is_in(event_ids));
    }

    // A year filter becomes a date range so the pagination counts stay honest.
    if let Some(year) = query.year {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::Validation(format!("Invalid year {}", year)))?;
        let end = year
            .checked_add(1)
            .and_then(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).single())
            .ok_or_else(|| AppError::Validation(format!("Invalid year {}", year)))?;
        select = select
            .filter(events::Column::Date.gte(start))
            .filter(events::Column::Date.lt(end));
    }

    let total_items = select.clone().count(&state.db).await?;
    let total_pages = total_items.div_ceil(page_size);

    let rows = select
        .find_also_related(venues::Entity)
        .order_by_desc(events::Column::Date)
        .paginate(&state.db, page_size)
        .fetch_page(page - 1)
        .await?;

    let event_ids: Vec<Uuid> = rows.iter().map(|(e, _)| e.id).collect();
    let my_attendances = attendances::Entity::find()
        .filter(attendances::Column::UserId.eq(user.user_id))
        .filter(attendances::Column::EventId.is_in(event_ids))
        .all(&state.db)
        .await?;

    let mut responses: Vec<EventResponse> = Vec::with_capacity(rows.len());
    for (event, venue) in rows {
        let attendance_status = my_attendances
            .iter()
            .find(|a| a.event_id == event.id)
            .map(|a| a.status.clone());
        responses.push(EventResponse {
            id: event.id,
            name: event.name,
            date: event.date.with_timezone(&Utc),
            source: event.source,
            source_url: event.source_url,
            venue: venue.map(|v| VenueSummary {
                id: v.id,
                name: v.name,
                city: v.city,
            }),
            attendance_status,
        });
    }

    Ok(Json(PaginatedEventsResponse {
        events: responses,
        pagination: PaginationInfo {
            page,
            page_size,
            total_items,
            total_pages,
        },
    }))
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub venue_id: Option<Uuid>,
    #[serde(default)]
    pub artist_ids: Vec<Uuid>,
}

pub async fn create_event(
    State(state): State<AppState>,
    _user: UserContext,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<events::Model>)> {
    let event = event_service::create_event(
        &state.db,
        event_service::NewEvent {
            name: payload.name,
            date: payload.date,
            venue_id: payload.venue_id,
            artist_ids: payload.artist_ids,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[derive(Deserialize)]
pub struct ImportEventRequest {
    pub event: CanonicalEvent,
    pub fallback_artist: Option<String>,
}

#[derive(Serialize)]
pub struct ImportEventResponse {
    pub event_id: Uuid,
}

/// Ingest a canonical external event. The response carries the new event
/// id; any navigation is the client's decision.
pub async fn import_event(
    State(state): State<AppState>,
    _user: UserContext,
    Json(payload): Json<ImportEventRequest>,
) -> Result<(StatusCode, Json<ImportEventResponse>)> {
    let event_id = ingest::add_external_event(
        &state.db,
        &payload.event,
        payload.fallback_artist.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ImportEventResponse { event_id })))
}

pub async fn get_event(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetailResponse>> {
    let (event, venue) = events::Entity::find_by_id(id)
        .find_also_related(venues::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let lineup = lineups::Entity::find()
        .filter(lineups::Column::EventId.eq(id))
        .find_also_related(crate::db::entities::artists::Entity)
        .all(&state.db)
        .await?
        .into_iter()
        .filter_map(|(_, artist)| artist)
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name,
            genre: a.genre,
            image_url: a.image_url,
        })
        .collect();

    let my_attendance = attendances::Entity::find()
        .filter(attendances::Column::EventId.eq(id))
        .filter(attendances::Column::UserId.eq(user.user_id))
        .one(&state.db)
        .await?;

    let memory = match &my_attendance {
        Some(att) => memories::Entity::find()
            .filter(memories::Column::AttendanceId.eq(att.id))
            .one(&state.db)
            .await?
            .map(|m| MemoryResponse {
                rating: m.rating,
                review: m.review,
                notes: m.notes,
            }),
        None => None,
    };

    let photos = event_photos::Entity::find()
        .filter(event_photos::Column::EventId.eq(id))
        .order_by_asc(event_photos::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| PhotoResponse {
            id: p.id,
            caption: p.caption,
            url: storage::public_photo_url(&state.config, &p.storage_path),
        })
        .collect();

    Ok(Json(EventDetailResponse {
        id: event.id,
        name: event.name,
        date: event.date.with_timezone(&Utc),
        source: event.source,
        source_url: event.source_url,
        venue: venue.map(|v| VenueSummary {
            id: v.id,
            name: v.name,
            city: v.city,
        }),
        lineup,
        attendance_status: my_attendance.map(|a| a.status),
        memory,
        photos,
    }))
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Present-but-null clears the venue; absent leaves it unchanged.
    #[serde(default, deserialize_with = "double_option")]
    pub venue_id: Option<Option<Uuid>>,
    pub source_url: Option<String>,
}

fn double_option<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<Uuid>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

pub async fn update_event(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<events::Model>> {
    let event = event_service::update_event(
        &state.db,
        id,
        event_service::EventUpdate {
            name: payload.name,
            date: payload.date,
            venue_id: payload.venue_id,
            source_url: payload.source_url,
        },
    )
    .await?;

    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    event_service::delete_event(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AddLineupRequest {
    pub artist_id: Uuid,
}

pub async fn add_lineup_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddLineupRequest>,
) -> Result<StatusCode> {
    event_service::add_lineup_artist(&state.db, id, payload.artist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_lineup_artist(
    State(state): State<AppState>,
    _user: UserContext,
    Path((id, artist_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    event_service::remove_lineup_artist(&state.db, id, artist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SetAttendanceRequest {
    /// Defaults to `interested` on first interaction.
    pub status: Option<AttendanceStatus>,
}

pub async fn set_attendance(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAttendanceRequest>,
) -> Result<Json<attendances::Model>> {
    let status = payload.status.unwrap_or(AttendanceStatus::Interested);
    let row = attendance::set_event_status(&state.db, user, id, status).await?;
    Ok(Json(row))
}

pub async fn save_memory(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<attendance::MemoryInput>,
) -> Result<Json<memories::Model>> {
    let memory = attendance::save_memory(&state.db, user, id, payload).await?;
    Ok(Json(memory))
}

pub async fn list_photos(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PhotoResponse>>> {
    let photos = event_photos::Entity::find()
        .filter(event_photos::Column::EventId.eq(id))
        .order_by_asc(event_photos::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| PhotoResponse {
            id: p.id,
            caption: p.caption,
            url: storage::public_photo_url(&state.config, &p.storage_path),
        })
        .collect();

    Ok(Json(photos))
}

#[derive(Deserialize)]
pub struct AddPhotoRequest {
    /// Original filename; only the extension is used.
    pub filename: String,
    pub caption: Option<String>,
}

#[derive(Serialize)]
pub struct AddPhotoResponse {
    pub id: Uuid,
    /// Path the client should upload the blob to.
    pub storage_path: String,
}

/// Register photo metadata and hand back the object path the blob should
/// be uploaded to; the upload itself happens against the external store.
pub async fn add_photo(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddPhotoRequest>,
) -> Result<(StatusCode, Json<AddPhotoResponse>)> {
    events::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let storage_path = storage::photo_object_path(id, &payload.filename)?;

    let now = Utc::now();
    let photo = event_photos::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(id),
        storage_path: Set(storage_path.clone()),
        caption: Set(optional_text(payload.caption.as_deref(), MAX_CAPTION_LEN)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddPhotoResponse {
            id: photo.id,
            storage_path,
        }),
    ))
}

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{artists, attendances, event_photos, events, lineups, memories, venues, wishlist_artists},
    db::enums::AttendanceStatus,
    error::{AppError, Result},
    services::stats,
    state::AppState,
    storage,
    templates::{
        artist_detail_page, artists_page, event_detail_page, home_page, stats_page, wrapped_page,
        ArtistCardData, EventCardData, EventDetailData, PhotoView,
    },
};

#[derive(Deserialize)]
pub struct HomeQuery {
    pub status: Option<String>,
}

fn date_line(date: &chrono::DateTime<chrono::FixedOffset>) -> String {
    date.with_timezone(&Utc).format("%-d %b %Y, %H:%M").to_string()
}

fn venue_line(venue: &venues::Model) -> String {
    match &venue.city {
        Some(city) => format!("{} · {}", venue.name, city),
        None => venue.name.clone(),
    }
}

pub async fn index(
    State(state): State<AppState>,
    user: UserContext,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>> {
    let my_attendances = attendances::Entity::find()
        .filter(attendances::Column::UserId.eq(user.user_id))
        .all(&state.db)
        .await?;

    let mut select = events::Entity::find();

    let active_filter = query.status.as_deref().and_then(AttendanceStatus::from_str);
    if let Some(status) = active_filter {
        let ids: Vec<Uuid> = my_attendances
            .iter()
            .filter(|a| a.status == status.as_str())
            .map(|a| a.event_id)
            .collect();
        select = select.filter(events::Column::Id.is_in(ids));
    }

    let rows = select
        .find_also_related(venues::Entity)
        .order_by_desc(events::Column::Date)
        .all(&state.db)
        .await?;

    let cards = rows
        .into_iter()
        .map(|(event, venue)| EventCardData {
            id: event.id,
            name: event.name.clone().unwrap_or_else(|| "Untitled show".to_string()),
            date_line: date_line(&event.date),
            venue_line: venue.as_ref().map(venue_line),
            status: my_attendances
                .iter()
                .find(|a| a.event_id == event.id)
                .and_then(|a| AttendanceStatus::from_str(&a.status)),
        })
        .collect();

    let filter = active_filter.map(|s| s.as_str());
    Ok(Html(home_page(cards, filter).into_string()))
}

pub async fn event_detail(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let (event, venue) = events::Entity::find_by_id(id)
        .find_also_related(venues::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let lineup = lineups::Entity::find()
        .filter(lineups::Column::EventId.eq(id))
        .find_also_related(artists::Entity)
        .all(&state.db)
        .await?
        .into_iter()
        .filter_map(|(_, artist)| artist.map(|a| (a.id, a.name)))
        .collect();

    let my_attendance = attendances::Entity::find()
        .filter(attendances::Column::EventId.eq(id))
        .filter(attendances::Column::UserId.eq(user.user_id))
        .one(&state.db)
        .await?;

    let memory = match &my_attendance {
        Some(att) => {
            memories::Entity::find()
                .filter(memories::Column::AttendanceId.eq(att.id))
                .one(&state.db)
                .await?
        }
        None => None,
    };

    let photos = event_photos::Entity::find()
        .filter(event_photos::Column::EventId.eq(id))
        .order_by_asc(event_photos::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| PhotoView {
            url: storage::public_photo_url(&state.config, &p.storage_path),
            caption: p.caption,
        })
        .collect();

    let data = EventDetailData {
        id: event.id,
        name: event.name.clone().unwrap_or_else(|| "Untitled show".to_string()),
        date_line: date_line(&event.date),
        venue_line: venue.as_ref().map(venue_line),
        source_url: event.source_url,
        lineup,
        status: my_attendance
            .as_ref()
            .and_then(|a| AttendanceStatus::from_str(&a.status)),
        rating: memory.as_ref().and_then(|m| m.rating),
        review: memory.as_ref().and_then(|m| m.review.clone()),
        notes: memory.and_then(|m| m.notes),
        photos,
    };

    Ok(Html(event_detail_page(data).into_string()))
}

pub async fn artists_index(
    State(state): State<AppState>,
    _user: UserContext,
) -> Result<Html<String>> {
    let rows = artists::Entity::find()
        .order_by_asc(artists::Column::NameNormalized)
        .all(&state.db)
        .await?;

    let cards = rows
        .into_iter()
        .map(|a| ArtistCardData {
            id: a.id,
            name: a.name,
            genre: a.genre,
            image_url: a.image_url,
        })
        .collect();

    Ok(Html(artists_page(cards).into_string()))
}

pub async fn artist_detail(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
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

    let my_attendances = attendances::Entity::find()
        .filter(attendances::Column::UserId.eq(user.user_id))
        .filter(attendances::Column::EventId.is_in(event_ids.clone()))
        .all(&state.db)
        .await?;

    let rows = events::Entity::find()
        .filter(events::Column::Id.is_in(event_ids))
        .find_also_related(venues::Entity)
        .order_by_desc(events::Column::Date)
        .all(&state.db)
        .await?;

    let cards: Vec<EventCardData> = rows
        .into_iter()
        .map(|(event, venue)| EventCardData {
            id: event.id,
            name: event.name.clone().unwrap_or_else(|| "Untitled show".to_string()),
            date_line: date_line(&event.date),
            venue_line: venue.as_ref().map(venue_line),
            status: my_attendances
                .iter()
                .find(|a| a.event_id == event.id)
                .and_then(|a| AttendanceStatus::from_str(&a.status)),
        })
        .collect();

    let on_wishlist = wishlist_artists::Entity::find()
        .filter(wishlist_artists::Column::UserId.eq(user.user_id))
        .filter(wishlist_artists::Column::ArtistId.eq(id))
        .one(&state.db)
        .await?
        .is_some();

    let card = ArtistCardData {
        id: artist.id,
        name: artist.name,
        genre: artist.genre,
        image_url: artist.image_url,
    };

    Ok(Html(artist_detail_page(&card, cards, on_wishlist).into_string()))
}

pub async fn stats_page_handler(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Html<String>> {
    let data = stats::personal_stats(&state.db, user).await?;
    Ok(Html(stats_page(&data).into_string()))
}

pub async fn wrapped_page_handler(
    State(state): State<AppState>,
    user: UserContext,
    Path(year): Path<i32>,
) -> Result<Html<String>> {
    let data = stats::wrapped(&state.db, user, year).await?;
    Ok(Html(wrapped_page(&data).into_string()))
}

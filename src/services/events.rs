//! Event lifecycle: manual creation, updates, lineup edits, and deletion.
//!
//! Deletion is only exposed through [`delete_event`], which removes every
//! dependent row before the event itself inside one transaction. Lineup
//! rows are always deleted strictly before the event row; callers cannot
//! reach the event row directly.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::entities::{
    attendances, event_photos, events, festival_events, lineups, memories, venues,
};
use crate::db::enums::EventSource;
use crate::error::{AppError, Result};
use crate::validate::{optional_text, MAX_NAME_LEN, MAX_URL_LEN};

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub venue_id: Option<Uuid>,
    pub artist_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub venue_id: Option<Option<Uuid>>,
    pub source_url: Option<String>,
}

/// Create a manually-entered event, with optional initial lineup.
pub async fn create_event(db: &DatabaseConnection, input: NewEvent) -> Result<events::Model> {
    if let Some(venue_id) = input.venue_id {
        venues::Entity::find_by_id(venue_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))?;
    }

    let txn = db.begin().await?;

    let now = Utc::now();
    let event = events::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(optional_text(input.name.as_deref(), MAX_NAME_LEN)),
        date: Set(input.date.into()),
        venue_id: Set(input.venue_id),
        source: Set(EventSource::Manual.as_str().to_string()),
        source_url: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    for artist_id in input.artist_ids {
        lineups::ActiveModel {
            event_id: Set(event.id),
            artist_id: Set(artist_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(event)
}

pub async fn update_event(
    db: &DatabaseConnection,
    event_id: Uuid,
    update: EventUpdate,
) -> Result<events::Model> {
    let event = events::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let mut active: events::ActiveModel = event.into();

    if let Some(name) = update.name {
        active.name = Set(optional_text(Some(&name), MAX_NAME_LEN));
    }
    if let Some(date) = update.date {
        active.date = Set(date.into());
    }
    if let Some(venue_id) = update.venue_id {
        if let Some(id) = venue_id {
            venues::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))?;
        }
        active.venue_id = Set(venue_id);
    }
    if let Some(url) = update.source_url {
        active.source_url = Set(optional_text(Some(&url), MAX_URL_LEN));
    }
    active.updated_at = Set(Utc::now().into());

    Ok(active.update(db).await?)
}

/// Add one artist to an event's lineup. At most one row per pair; a
/// repeat add is a no-op success.
pub async fn add_lineup_artist(
    db: &DatabaseConnection,
    event_id: Uuid,
    artist_id: Uuid,
) -> Result<()> {
    let existing = lineups::Entity::find()
        .filter(lineups::Column::EventId.eq(event_id))
        .filter(lineups::Column::ArtistId.eq(artist_id))
        .one(db)
        .await?;

    if existing.is_none() {
        lineups::ActiveModel {
            event_id: Set(event_id),
            artist_id: Set(artist_id),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

pub async fn remove_lineup_artist(
    db: &DatabaseConnection,
    event_id: Uuid,
    artist_id: Uuid,
) -> Result<()> {
    lineups::Entity::delete_many()
        .filter(lineups::Column::EventId.eq(event_id))
        .filter(lineups::Column::ArtistId.eq(artist_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Delete an event and everything that references it, in dependency
/// order, atomically. Venues and artists are never garbage collected
/// here; expense rows survive with their event reference nulled by the
/// store's `SET NULL` action.
pub async fn delete_event(db: &DatabaseConnection, event_id: Uuid) -> Result<()> {
    events::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let txn = db.begin().await?;

    let attendance_ids: Vec<Uuid> = attendances::Entity::find()
        .filter(attendances::Column::EventId.eq(event_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    memories::Entity::delete_many()
        .filter(memories::Column::AttendanceId.is_in(attendance_ids))
        .exec(&txn)
        .await?;

    attendances::Entity::delete_many()
        .filter(attendances::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;

    lineups::Entity::delete_many()
        .filter(lineups::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;

    event_photos::Entity::delete_many()
        .filter(event_photos::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;

    festival_events::Entity::delete_many()
        .filter(festival_events::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;

    events::Entity::delete_by_id(event_id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(event_id = %event_id, "Deleted event and dependent rows");
    Ok(())
}

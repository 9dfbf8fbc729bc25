//! Entity resolution for externally-sourced events.
//!
//! Venues and artists are deduped by normalized (trimmed + lowercased)
//! name, backed by a unique index. All writes for one ingested event run
//! inside a single transaction, so a failure partway leaves no orphaned
//! rows.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::db::entities::{artists, events, lineups, venues};
use crate::error::{AppError, Result};
use crate::ingest::normalizer::CanonicalEvent;
use crate::validate::{normalize_name, optional_text, sanitize_text, MAX_NAME_LEN};

/// Used when no artist name can be derived from the payload at all.
const UNKNOWN_ARTIST: &str = "Artista";

/// Resolve a canonical external event into Venue, Artist, Event and Lineup
/// rows, returning the new event's id. Navigation is the caller's concern.
pub async fn add_external_event(
    db: &DatabaseConnection,
    canonical: &CanonicalEvent,
    fallback_artist: Option<&str>,
) -> Result<Uuid> {
    // Reject before any write; no partial event is ever created.
    let venue_name = canonical
        .venue
        .name
        .as_deref()
        .map(|n| sanitize_text(n, MAX_NAME_LEN))
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Event has no venue name".to_string()))?;

    let starts_at = canonical
        .starts_at
        .ok_or_else(|| AppError::Validation("Event has no usable date".to_string()))?;

    let artist_name = resolve_artist_name(canonical, fallback_artist);

    let display_name = canonical
        .title
        .as_deref()
        .and_then(|t| optional_text(Some(t), MAX_NAME_LEN))
        .unwrap_or_else(|| format!("{} @ {}", artist_name, venue_name));

    let txn = db.begin().await?;

    let venue = find_or_create_venue(
        &txn,
        &venue_name,
        canonical.venue.city.as_deref(),
        canonical.venue.country.as_deref(),
    )
    .await?;

    let artist = find_or_create_artist(&txn, &artist_name).await?;

    let now = Utc::now();
    let event = events::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(Some(display_name)),
        date: Set(starts_at.into()),
        venue_id: Set(Some(venue.id)),
        source: Set(canonical.source.as_str().to_string()),
        source_url: Set(canonical.url.clone()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    lineups::ActiveModel {
        event_id: Set(event.id),
        artist_id: Set(artist.id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        event_id = %event.id,
        source = canonical.source.as_str(),
        "Ingested external event"
    );

    Ok(event.id)
}

/// Artist name priority: explicit fallback, then the first lineup entry,
/// then the event title, then a placeholder. First non-empty sanitized
/// candidate wins.
fn resolve_artist_name(canonical: &CanonicalEvent, fallback_artist: Option<&str>) -> String {
    fallback_artist
        .and_then(|n| optional_text(Some(n), MAX_NAME_LEN))
        .or_else(|| {
            canonical
                .lineup
                .first()
                .and_then(|n| optional_text(Some(n), MAX_NAME_LEN))
        })
        .or_else(|| canonical.title.as_deref().and_then(|t| optional_text(Some(t), MAX_NAME_LEN)))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

/// Find-or-create an artist by normalized name. The insert goes through
/// `ON CONFLICT DO NOTHING` and re-selects, so a concurrent creation of
/// the same name resolves to one row instead of erroring.
pub async fn find_or_create_artist<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<artists::Model> {
    let name = sanitize_text(name, MAX_NAME_LEN);
    let normalized = normalize_name(&name);

    if let Some(existing) = artists::Entity::find()
        .filter(artists::Column::NameNormalized.eq(normalized.clone()))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    let model = artists::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        name_normalized: Set(normalized.clone()),
        genre: Set(None),
        image_url: Set(None),
        spotify_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    artists::Entity::insert(model)
        .on_conflict(
            OnConflict::column(artists::Column::NameNormalized)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    artists::Entity::find()
        .filter(artists::Column::NameNormalized.eq(normalized))
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("Artist vanished after insert".to_string()))
}

/// Venue twin of [`find_or_create_artist`].
pub async fn find_or_create_venue<C: ConnectionTrait>(
    db: &C,
    name: &str,
    city: Option<&str>,
    country: Option<&str>,
) -> Result<venues::Model> {
    let name = sanitize_text(name, MAX_NAME_LEN);
    let normalized = normalize_name(&name);

    if let Some(existing) = venues::Entity::find()
        .filter(venues::Column::NameNormalized.eq(normalized.clone()))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    let model = venues::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        name_normalized: Set(normalized.clone()),
        city: Set(optional_text(city, crate::validate::MAX_CITY_LEN)),
        country: Set(optional_text(country, crate::validate::MAX_COUNTRY_LEN)),
        address: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    venues::Entity::insert(model)
        .on_conflict(
            OnConflict::column(venues::Column::NameNormalized)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    venues::Entity::find()
        .filter(venues::Column::NameNormalized.eq(normalized))
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("Venue vanished after insert".to_string()))
}

//! Test utilities for RITUAL
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories (no vendor services configured)
//! - Test data generators

use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    auth::UserContext,
    config::Config,
    db::entities::{artists, attendances, events, lineups, memories, venues},
    db::enums::{AttendanceStatus, EventSource},
    state::AppState,
    validate::normalize_name,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults and no vendor
/// credentials configured
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        storage_base_url: Some("https://blobs.test".to_string()),
        photo_bucket: "event-photos".to_string(),
        avatar_bucket: "avatars".to_string(),
        spotify_client_id: None,
        spotify_client_secret: None,
        lastfm_api_key: None,
        ticketmaster_api_key: None,
        setlistfm_api_key: None,
        bandsintown_app_id: None,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config())
}

/// A fresh user context for a test
pub fn test_user() -> UserContext {
    UserContext::new(Uuid::new_v4())
}

// ============================================================================
// Test Data Factories
// ============================================================================

pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artists::Model {
    let now = Utc::now();
    artists::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        name_normalized: Set(normalize_name(name)),
        genre: Set(None),
        image_url: Set(None),
        spotify_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test artist")
}

pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: Option<&str>,
) -> venues::Model {
    let now = Utc::now();
    venues::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        name_normalized: Set(normalize_name(name)),
        city: Set(city.map(|c| c.to_string())),
        country: Set(None),
        address: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test venue")
}

pub async fn create_test_event(
    db: &DatabaseConnection,
    name: &str,
    date: DateTime<Utc>,
    venue_id: Option<Uuid>,
) -> events::Model {
    let now = Utc::now();
    events::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(Some(name.to_string())),
        date: Set(date.into()),
        venue_id: Set(venue_id),
        source: Set(EventSource::Manual.as_str().to_string()),
        source_url: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test event")
}

pub async fn add_test_lineup(db: &DatabaseConnection, event_id: Uuid, artist_id: Uuid) {
    lineups::ActiveModel {
        event_id: Set(event_id),
        artist_id: Set(artist_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert test lineup row");
}

pub async fn create_test_attendance(
    db: &DatabaseConnection,
    event_id: Uuid,
    user: UserContext,
    status: AttendanceStatus,
) -> attendances::Model {
    let now = Utc::now();
    attendances::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(event_id),
        user_id: Set(user.user_id),
        status: Set(status.as_str().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test attendance")
}

pub async fn create_test_memory(
    db: &DatabaseConnection,
    attendance_id: Uuid,
    rating: Option<i32>,
) -> memories::Model {
    let now = Utc::now();
    memories::ActiveModel {
        id: Set(Uuid::new_v4()),
        attendance_id: Set(attendance_id),
        rating: Set(rating),
        review: Set(None),
        notes: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test memory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let rows = artists::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 0);
    }

    #[tokio::test]
    async fn test_factories_link_up() {
        let db = setup_test_db().await;
        let artist = create_test_artist(&db, "Test Artist").await;
        let venue = create_test_venue(&db, "Test Hall", Some("Lisbon")).await;
        let event = create_test_event(&db, "Test Show", Utc::now(), Some(venue.id)).await;
        add_test_lineup(&db, event.id, artist.id).await;

        let attendance =
            create_test_attendance(&db, event.id, test_user(), AttendanceStatus::Went).await;
        let memory = create_test_memory(&db, attendance.id, Some(4)).await;

        assert_eq!(memory.attendance_id, attendance.id);
        assert_eq!(attendance.event_id, event.id);
    }

    #[tokio::test]
    async fn test_parallel_databases_are_isolated() {
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        create_test_artist(&db1, "Artist 1").await;
        create_test_artist(&db2, "Artist 2").await;

        let db1_artists = artists::Entity::find().all(&db1).await.unwrap();
        let db2_artists = artists::Entity::find().all(&db2).await.unwrap();

        assert_eq!(db1_artists.len(), 1);
        assert_eq!(db2_artists.len(), 1);
        assert_eq!(db1_artists[0].name, "Artist 1");
        assert_eq!(db2_artists[0].name, "Artist 2");
    }
}

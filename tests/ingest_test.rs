//! Integration tests for external-event ingestion
//!
//! Covers the normalizer-to-resolver pipeline: validation before any
//! write, case-insensitive entity dedup, and the end-to-end Ticketmaster
//! fixture.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use sea_orm::EntityTrait;

use ritual::db::entities::{artists, events, lineups, venues};
use ritual::ingest::normalizer::{
    normalize_ticketmaster, CanonicalEvent, CanonicalVenue, TicketmasterEvent,
};
use ritual::ingest::resolver::add_external_event;
use ritual::db::enums::EventSource;
use ritual::test_utils::setup_test_db;

fn canonical(venue_name: Option<&str>, dated: bool) -> CanonicalEvent {
    CanonicalEvent {
        source: EventSource::Bandsintown,
        source_id: "x-1".to_string(),
        title: Some("Some Show".to_string()),
        starts_at: dated.then(|| Utc.with_ymd_and_hms(2025, 9, 1, 20, 0, 0).unwrap()),
        date_text: None,
        venue: CanonicalVenue {
            name: venue_name.map(|n| n.to_string()),
            city: Some("Porto".to_string()),
            country: Some("Portugal".to_string()),
        },
        lineup: vec!["The Band".to_string()],
        url: None,
    }
}

#[tokio::test]
async fn missing_venue_name_rejects_with_zero_writes() {
    let db = setup_test_db().await;

    let result = add_external_event(&db, &canonical(None, true), None).await;
    assert!(result.is_err());

    assert_eq!(venues::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(artists::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(events::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(lineups::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn missing_date_rejects_with_zero_writes() {
    let db = setup_test_db().await;

    let result = add_external_event(&db, &canonical(Some("Teatro Y"), false), None).await;
    assert!(result.is_err());

    assert_eq!(venues::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(events::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn case_differing_names_resolve_to_same_rows() {
    let db = setup_test_db().await;

    let mut first = canonical(Some("Teatro Y"), true);
    first.lineup = vec!["Artist X".to_string()];
    let mut second = canonical(Some("TEATRO Y"), true);
    second.lineup = vec!["ARTIST X".to_string()];

    add_external_event(&db, &first, None).await.unwrap();
    add_external_event(&db, &second, None).await.unwrap();

    // Two events, but one venue and one artist: dedup is idempotent for
    // exact case-insensitive matches.
    assert_eq!(events::Entity::find().all(&db).await.unwrap().len(), 2);
    assert_eq!(venues::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(artists::Entity::find().all(&db).await.unwrap().len(), 1);

    let venue = venues::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(venue.name, "Teatro Y");
}

#[tokio::test]
async fn fallback_artist_beats_lineup_and_title() {
    let db = setup_test_db().await;

    let event = canonical(Some("Teatro Y"), true);
    add_external_event(&db, &event, Some("  Override Act  "))
        .await
        .unwrap();

    let artist = artists::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(artist.name, "Override Act");
}

#[tokio::test]
async fn untitled_event_gets_synthesized_display_name() {
    let db = setup_test_db().await;

    let mut event = canonical(Some("Teatro Y"), true);
    event.title = None;
    let event_id = add_external_event(&db, &event, None).await.unwrap();

    let stored = events::Entity::find_by_id(event_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name.as_deref(), Some("The Band @ Teatro Y"));
}

#[tokio::test]
async fn ticketmaster_fixture_end_to_end() {
    let db = setup_test_db().await;

    let payload: TicketmasterEvent = serde_json::from_value(serde_json::json!({
        "id": "tm-100",
        "name": "Artist X Live",
        "dates": {"start": {"dateTime": "2025-06-01T20:00:00Z"}},
        "_embedded": {
            "venues": [{"name": "Teatro Y"}],
            "attractions": [{"name": "Artist X"}]
        }
    }))
    .unwrap();

    let canonical = normalize_ticketmaster(&payload);
    let event_id = add_external_event(&db, &canonical, None).await.unwrap();

    let event = events::Entity::find_by_id(event_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.name.as_deref(), Some("Artist X Live"));
    assert_eq!(
        event.date.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap()
    );
    assert_eq!(event.source, "ticketmaster");

    let venue = venues::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(venue.name, "Teatro Y");
    assert_eq!(event.venue_id, Some(venue.id));

    let artist = artists::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(artist.name, "Artist X");

    let lineup = lineups::Entity::find().all(&db).await.unwrap();
    assert_eq!(lineup.len(), 1);
    assert_eq!(lineup[0].event_id, event.id);
    assert_eq!(lineup[0].artist_id, artist.id);
}

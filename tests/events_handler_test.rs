//! Integration tests for the HTTP API routes
//!
//! Exercises the full stack: router, user-identity extractor, handlers,
//! services and the in-memory database.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use sea_orm::EntityTrait;
use serde_json::json;
use tower::util::ServiceExt;

use ritual::auth::{UserContext, USER_HEADER};
use ritual::db::entities::{attendances, events, lineups, memories, venues};
use ritual::db::enums::AttendanceStatus;
use ritual::handlers;
use ritual::state::AppState;
use ritual::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

fn request(method: Method, uri: &str, user: UserContext, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_HEADER, user.user_id.to_string());

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn requests_without_identity_are_unauthorized() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn identity_via_cookie_is_accepted() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .header(header::COOKIE, format!("ritual_user={}", user.user_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_events_empty() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(Method::GET, "/api/events", test_user(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total_items"], 0);
}

#[tokio::test]
async fn create_and_fetch_event_with_lineup() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let venue = create_test_venue(&state.db, "Paradiso", Some("Amsterdam")).await;
    let artist = create_test_artist(&state.db, "The Sweepers").await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/events",
            user,
            Some(json!({
                "name": "Sweepers Live",
                "date": "2025-10-01T20:00:00Z",
                "venue_id": venue.id,
                "artist_ids": [artist.id],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: serde_json::Value = parse_json_response(response).await;
    let event_id = created["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(request(
            Method::GET,
            &format!("/api/events/{event_id}"),
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail: serde_json::Value = parse_json_response(response).await;
    assert_eq!(detail["name"], "Sweepers Live");
    assert_eq!(detail["venue"]["name"], "Paradiso");
    assert_eq!(detail["lineup"][0]["name"], "The Sweepers");
    assert_eq!(detail["attendance_status"], serde_json::Value::Null);
}

#[tokio::test]
async fn list_events_filters_by_my_status() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let went = create_test_event(
        &state.db,
        "Went Show",
        Utc.with_ymd_and_hms(2025, 1, 10, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    let planned = create_test_event(
        &state.db,
        "Planned Show",
        Utc.with_ymd_and_hms(2025, 2, 10, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    create_test_attendance(&state.db, went.id, user, AttendanceStatus::Went).await;
    create_test_attendance(&state.db, planned.id, user, AttendanceStatus::Interested).await;

    let response = app
        .oneshot(request(Method::GET, "/api/events?status=went", user, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Went Show");
    assert_eq!(events[0]["attendance_status"], "went");
}

#[tokio::test]
async fn year_filter_counts_only_matching_events() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    create_test_event(
        &state.db,
        "Spring 2024",
        Utc.with_ymd_and_hms(2024, 4, 5, 20, 0, 0).unwrap(),
        None,
    )
    .await;
    create_test_event(
        &state.db,
        "Autumn 2024",
        Utc.with_ymd_and_hms(2024, 10, 5, 20, 0, 0).unwrap(),
        None,
    )
    .await;
    create_test_event(
        &state.db,
        "Winter 2023",
        Utc.with_ymd_and_hms(2023, 12, 5, 20, 0, 0).unwrap(),
        None,
    )
    .await;

    // page_size 1 forces the year constraint through the count and the page
    // query, not just the returned rows.
    let response = app
        .clone()
        .oneshot(request(
            Method::GET,
            "/api/events?year=2024&page_size=1",
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Autumn 2024");
    assert_eq!(body["pagination"]["total_items"], 2);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let response = app
        .oneshot(request(
            Method::GET,
            "/api/events?year=2024&page_size=1&page=2",
            user,
            None,
        ))
        .await
        .unwrap();
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["events"][0]["name"], "Spring 2024");
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            Method::GET,
            "/api/events?status=maybe",
            test_user(),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn attendance_defaults_to_interested() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let event = create_test_event(
        &state.db,
        "Show",
        Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    let response = app
        .oneshot(request(
            Method::PUT,
            &format!("/api/events/{}/attendance", event.id),
            user,
            Some(json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["status"], "interested");
}

#[tokio::test]
async fn memory_rating_out_of_range_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let event = create_test_event(
        &state.db,
        "Show",
        Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    let response = app
        .oneshot(request(
            Method::PUT,
            &format!("/api/events/{}/memory", event.id),
            user,
            Some(json!({"rating": 6})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        memories::Entity::find().all(&state.db).await.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn delete_event_removes_dependents_but_not_entities() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let venue = create_test_venue(&state.db, "Paradiso", None).await;
    let artist = create_test_artist(&state.db, "The Sweepers").await;
    let event = create_test_event(
        &state.db,
        "Show",
        Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap(),
        Some(venue.id),
    )
    .await;
    add_test_lineup(&state.db, event.id, artist.id).await;
    let attendance =
        create_test_attendance(&state.db, event.id, user, AttendanceStatus::Went).await;
    create_test_memory(&state.db, attendance.id, Some(5)).await;

    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/api/events/{}", event.id),
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(events::Entity::find_by_id(event.id)
        .one(&state.db)
        .await
        .unwrap()
        .is_none());
    assert_eq!(lineups::Entity::find().all(&state.db).await.unwrap().len(), 0);
    assert_eq!(
        attendances::Entity::find().all(&state.db).await.unwrap().len(),
        0
    );
    assert_eq!(
        memories::Entity::find().all(&state.db).await.unwrap().len(),
        0
    );

    // Artist and venue survive; other events may reference them.
    assert!(venues::Entity::find_by_id(venue.id)
        .one(&state.db)
        .await
        .unwrap()
        .is_some());
    assert!(
        ritual::db::entities::artists::Entity::find_by_id(artist.id)
            .one(&state.db)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn import_endpoint_creates_event_from_canonical_payload() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/events/import",
            test_user(),
            Some(json!({
                "event": {
                    "source": "ticketmaster",
                    "source_id": "tm-1",
                    "title": "Artist X Live",
                    "starts_at": "2025-06-01T20:00:00Z",
                    "date_text": null,
                    "venue": {"name": "Teatro Y", "city": "Madrid", "country": "Spain"},
                    "lineup": ["Artist X"],
                    "url": null
                }
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = parse_json_response(response).await;
    let event_id: uuid::Uuid = body["event_id"].as_str().unwrap().parse().unwrap();

    let event = events::Entity::find_by_id(event_id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.source, "ticketmaster");
}

#[tokio::test]
async fn expense_with_nonpositive_amount_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/expenses",
            test_user(),
            Some(json!({"amount": 0.0, "category": "ticket"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expenses_are_scoped_to_the_requesting_user() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let alice = test_user();
    let bob = test_user();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/expenses",
            alice,
            Some(json!({"amount": 79.5, "category": "ticket", "note": "Front row"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/expenses", bob, None))
        .await
        .unwrap();
    let theirs: Vec<serde_json::Value> = parse_json_response(response).await;
    assert!(theirs.is_empty());

    let response = app
        .oneshot(request(Method::GET, "/api/expenses", alice, None))
        .await
        .unwrap();
    let mine: Vec<serde_json::Value> = parse_json_response(response).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["amount"], 79.5);
}

#[tokio::test]
async fn wishlist_add_is_idempotent() {
    use fake::{faker::name::en::Name, Fake};

    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let artist_name: String = Name().fake();
    let artist = create_test_artist(&state.db, &artist_name).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                &format!("/api/wishlist/{}", artist.id),
                user,
                Some(json!({})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/wishlist", user, None))
        .await
        .unwrap();
    let list: Vec<serde_json::Value> = parse_json_response(response).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], artist_name.as_str());

    let response = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            &format!("/api/wishlist/{}", artist.id),
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request(Method::GET, "/api/wishlist", user, None))
        .await
        .unwrap();
    let list: Vec<serde_json::Value> = parse_json_response(response).await;
    assert!(list.is_empty());
}

#[tokio::test]
async fn festival_attach_and_attendance_flow() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/festivals",
            user,
            Some(json!({"name": "Primavera", "city": "Barcelona"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let festival: serde_json::Value = parse_json_response(response).await;
    let festival_id = festival["id"].as_str().unwrap().to_string();

    let event = create_test_event(
        &state.db,
        "Headliner Set",
        Utc.with_ymd_and_hms(2025, 6, 5, 22, 0, 0).unwrap(),
        None,
    )
    .await;

    // Attaching twice keeps a single link.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                &format!("/api/festivals/{festival_id}/events"),
                user,
                Some(json!({"event_id": event.id, "day_label": "Day 2"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            &format!("/api/festivals/{festival_id}/attendance"),
            user,
            Some(json!({"status": "went", "rating": 5})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            Method::GET,
            &format!("/api/festivals/{festival_id}"),
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail: serde_json::Value = parse_json_response(response).await;
    assert_eq!(detail["events"].as_array().unwrap().len(), 1);
    assert_eq!(detail["events"][0]["day_label"], "Day 2");
    assert_eq!(detail["attendance"]["status"], "went");
    assert_eq!(detail["attendance"]["rating"], 5);
}

#[tokio::test]
async fn artist_delete_is_rejected_while_on_a_lineup() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let artist = create_test_artist(&state.db, "Booked Act").await;
    let event = create_test_event(
        &state.db,
        "Show",
        Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    add_test_lineup(&state.db, event.id, artist.id).await;

    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/api/artists/{}", artist.id),
            user,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        ritual::db::entities::artists::Entity::find_by_id(artist.id)
            .one(&state.db)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn search_without_parameters_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(Method::GET, "/api/search/events", test_user(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn home_page_renders_with_status_filter() {
    let state = setup_test_app_state().await;
    let app = Router::new()
        .merge(handlers::html_routes())
        .with_state(state.clone());
    let user = test_user();

    let event = create_test_event(
        &state.db,
        "Riverside Night",
        Utc.with_ymd_and_hms(2025, 4, 12, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    create_test_attendance(&state.db, event.id, user, AttendanceStatus::Went).await;

    let response = app
        .oneshot(request(Method::GET, "/?status=went", user, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Riverside Night"));
}

#[tokio::test]
async fn stats_endpoint_returns_aggregates() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let user = test_user();

    let event = create_test_event(
        &state.db,
        "Show",
        Utc.with_ymd_and_hms(2024, 8, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    let attendance =
        create_test_attendance(&state.db, event.id, user, AttendanceStatus::Went).await;
    create_test_memory(&state.db, attendance.id, Some(4)).await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/stats", user, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: serde_json::Value = parse_json_response(response).await;
    assert_eq!(stats["total_shows"], 1);
    assert_eq!(stats["average_rating"], 4.0);

    let response = app
        .oneshot(request(Method::GET, "/api/stats/wrapped/2024", user, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let wrapped: serde_json::Value = parse_json_response(response).await;
    assert_eq!(wrapped["year"], 2024);
    assert_eq!(wrapped["busiest_month"], 8);
}

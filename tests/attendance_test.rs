//! Integration tests for attendance status and memories.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use ritual::db::entities::{attendances, memories};
use ritual::db::enums::AttendanceStatus;
use ritual::services::attendance::{save_memory, set_event_status, MemoryInput};
use ritual::test_utils::{create_test_event, setup_test_db, test_user};

#[tokio::test]
async fn status_updates_reuse_one_row() {
    let db = setup_test_db().await;
    let user = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    let first = set_event_status(&db, user, event.id, AttendanceStatus::Interested)
        .await
        .unwrap();
    assert_eq!(first.status, "interested");

    let second = set_event_status(&db, user, event.id, AttendanceStatus::Going)
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.status, "going");

    let rows = attendances::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn status_jumps_are_free_form() {
    let db = setup_test_db().await;
    let user = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    // No pipeline: went can drop straight back to interested.
    set_event_status(&db, user, event.id, AttendanceStatus::Went)
        .await
        .unwrap();
    let row = set_event_status(&db, user, event.id, AttendanceStatus::Interested)
        .await
        .unwrap();
    assert_eq!(row.status, "interested");
}

#[tokio::test]
async fn status_on_unknown_event_is_not_found() {
    let db = setup_test_db().await;
    let result = set_event_status(
        &db,
        test_user(),
        uuid::Uuid::new_v4(),
        AttendanceStatus::Went,
    )
    .await;
    assert!(result.is_err());
    assert_eq!(attendances::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn rating_without_attendance_creates_one_as_went() {
    let db = setup_test_db().await;
    let user = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    let memory = save_memory(
        &db,
        user,
        event.id,
        MemoryInput {
            rating: Some(5),
            review: Some("Unreal encore".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(memory.rating, Some(5));

    let attendance = attendances::Entity::find()
        .filter(attendances::Column::UserId.eq(user.user_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(attendance.status, "went");
    assert_eq!(memory.attendance_id, attendance.id);
}

#[tokio::test]
async fn memory_saves_upsert_one_row() {
    let db = setup_test_db().await;
    let user = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    let first = save_memory(
        &db,
        user,
        event.id,
        MemoryInput {
            rating: Some(3),
            review: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    let second = save_memory(
        &db,
        user,
        event.id,
        MemoryInput {
            rating: Some(4),
            review: Some("Better on relisten".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.rating, Some(4));

    let rows = memories::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn out_of_range_rating_leaves_existing_memory_untouched() {
    let db = setup_test_db().await;
    let user = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    save_memory(
        &db,
        user,
        event.id,
        MemoryInput {
            rating: Some(4),
            review: Some("Original".to_string()),
            notes: None,
        },
    )
    .await
    .unwrap();

    let rejected = save_memory(
        &db,
        user,
        event.id,
        MemoryInput {
            rating: Some(6),
            review: Some("Should never land".to_string()),
            notes: None,
        },
    )
    .await;
    assert!(rejected.is_err());

    let memory = memories::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(memory.rating, Some(4));
    assert_eq!(memory.review.as_deref(), Some("Original"));
}

#[tokio::test]
async fn two_users_track_the_same_event_independently() {
    let db = setup_test_db().await;
    let alice = test_user();
    let bob = test_user();
    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2025, 5, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;

    set_event_status(&db, alice, event.id, AttendanceStatus::Went)
        .await
        .unwrap();
    set_event_status(&db, bob, event.id, AttendanceStatus::Interested)
        .await
        .unwrap();

    let rows = attendances::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 2);
}

//! Integration tests for the statistics aggregator.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use ritual::db::enums::AttendanceStatus;
use ritual::services::stats::{personal_stats, wrapped};
use ritual::test_utils::{
    add_test_lineup, create_test_artist, create_test_attendance, create_test_event,
    create_test_memory, create_test_venue, setup_test_db, test_user,
};

#[tokio::test]
async fn average_rating_skips_unrated_shows() {
    let db = setup_test_db().await;
    let user = test_user();

    // Three rated shows (3, 4, 5) plus one attended but unrated. The
    // unrated one must not drag the average toward zero.
    for (i, rating) in [Some(3), Some(4), Some(5), None].into_iter().enumerate() {
        let event = create_test_event(
            &db,
            &format!("Show {i}"),
            Utc.with_ymd_and_hms(2024, 3, 1 + i as u32, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        let attendance =
            create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
        if rating.is_some() {
            create_test_memory(&db, attendance.id, rating).await;
        }
    }

    let stats = personal_stats(&db, user).await.unwrap();
    assert_eq!(stats.total_shows, 4);
    assert_eq!(stats.average_rating, Some(4.0));
}

#[tokio::test]
async fn no_ratings_yields_null_average() {
    let db = setup_test_db().await;
    let user = test_user();

    let event = create_test_event(
        &db,
        "Show",
        Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap(),
        None,
    )
    .await;
    create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;

    let stats = personal_stats(&db, user).await.unwrap();
    assert_eq!(stats.total_shows, 1);
    assert_eq!(stats.average_rating, None);
}

#[tokio::test]
async fn planned_shows_do_not_count_as_attended() {
    let db = setup_test_db().await;
    let user = test_user();

    for (i, status) in [
        AttendanceStatus::Went,
        AttendanceStatus::Interested,
        AttendanceStatus::Going,
    ]
    .into_iter()
    .enumerate()
    {
        let event = create_test_event(
            &db,
            &format!("Show {i}"),
            Utc.with_ymd_and_hms(2024, 4, 1 + i as u32, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        create_test_attendance(&db, event.id, user, status).await;
    }

    let stats = personal_stats(&db, user).await.unwrap();
    assert_eq!(stats.total_shows, 1);
    assert_eq!(stats.status_counts.went, 1);
    assert_eq!(stats.status_counts.interested, 1);
}

#[tokio::test]
async fn top_artists_break_ties_by_first_seen_order() {
    let db = setup_test_db().await;
    let user = test_user();

    let a = create_test_artist(&db, "Alpha").await;
    let b = create_test_artist(&db, "Beta").await;
    let c = create_test_artist(&db, "Gamma").await;

    // A plays the three earliest shows, B the next three, C one; A and B
    // tie at 3 but A was seen first chronologically.
    let mut day = 1;
    for artist in [a.id, a.id, a.id, b.id, b.id, b.id, c.id] {
        let event = create_test_event(
            &db,
            &format!("Show {day}"),
            Utc.with_ymd_and_hms(2024, 6, day, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        add_test_lineup(&db, event.id, artist).await;
        create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
        day += 1;
    }

    let stats = personal_stats(&db, user).await.unwrap();
    let names: Vec<&str> = stats.top_artists.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(stats.top_artists[0].count, 3);
    assert_eq!(stats.top_artists[1].count, 3);
    assert_eq!(stats.top_artists[2].count, 1);
}

#[tokio::test]
async fn top_lists_cap_at_five() {
    let db = setup_test_db().await;
    let user = test_user();

    for i in 0..7 {
        let venue = create_test_venue(&db, &format!("Venue {i}"), None).await;
        let event = create_test_event(
            &db,
            &format!("Show {i}"),
            Utc.with_ymd_and_hms(2024, 7, 1 + i, 21, 0, 0).unwrap(),
            Some(venue.id),
        )
        .await;
        create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
    }

    let stats = personal_stats(&db, user).await.unwrap();
    assert_eq!(stats.top_venues.len(), 5);
}

#[tokio::test]
async fn shows_by_year_buckets_sorted_ascending() {
    let db = setup_test_db().await;
    let user = test_user();

    for (year, month) in [(2025, 2), (2023, 5), (2023, 9), (2024, 1)] {
        let event = create_test_event(
            &db,
            &format!("Show {year}-{month}"),
            Utc.with_ymd_and_hms(year, month, 10, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
    }

    let stats = personal_stats(&db, user).await.unwrap();
    let buckets: Vec<(i32, u64)> = stats
        .shows_by_year
        .iter()
        .map(|y| (y.year, y.count))
        .collect();
    assert_eq!(buckets, vec![(2023, 2), (2024, 1), (2025, 1)]);
}

#[tokio::test]
async fn wrapped_scopes_to_one_year_and_finds_busiest_month() {
    let db = setup_test_db().await;
    let user = test_user();

    // 2024: two June shows, one March show. 2023: noise that must not leak.
    for (year, month, day, rating) in [
        (2024, 6, 1, Some(5)),
        (2024, 6, 15, Some(3)),
        (2024, 3, 2, None),
        (2023, 11, 20, Some(1)),
    ] {
        let event = create_test_event(
            &db,
            &format!("Show {year}-{month}-{day}"),
            Utc.with_ymd_and_hms(year, month, day, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        let attendance =
            create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
        if rating.is_some() {
            create_test_memory(&db, attendance.id, rating).await;
        }
    }

    let data = wrapped(&db, user, 2024).await.unwrap();
    assert_eq!(data.total_shows, 3);
    assert_eq!(data.busiest_month, Some(6));
    assert_eq!(data.average_rating, Some(4.0));
}

#[tokio::test]
async fn busiest_month_ties_resolve_to_earliest() {
    let db = setup_test_db().await;
    let user = test_user();

    for month in [5, 2] {
        let event = create_test_event(
            &db,
            &format!("Show {month}"),
            Utc.with_ymd_and_hms(2024, month, 10, 21, 0, 0).unwrap(),
            None,
        )
        .await;
        create_test_attendance(&db, event.id, user, AttendanceStatus::Went).await;
    }

    let data = wrapped(&db, user, 2024).await.unwrap();
    assert_eq!(data.busiest_month, Some(2));
}

#[tokio::test]
async fn empty_year_has_no_busiest_month() {
    let db = setup_test_db().await;
    let user = test_user();

    let data = wrapped(&db, user, 2019).await.unwrap();
    assert_eq!(data.total_shows, 0);
    assert_eq!(data.busiest_month, None);
    assert_eq!(data.average_rating, None);
    assert!(data.top_artists.is_empty());
}

//! Personal statistics over the user's attendance history.
//!
//! Everything here is recomputed from the store on each call; at
//! personal-data scale (hundreds of rows) that is cheaper than keeping
//! aggregates fresh. Frequencies are grouped by entity id and projected
//! to a display name, so two distinct artists that happen to share a name
//! stay separate statistics.

use std::collections::HashMap;

use chrono::Datelike;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::UserContext;
use crate::db::entities::{artists, attendances, events, expenses, lineups, memories, venues};
use crate::db::enums::AttendanceStatus;
use crate::error::Result;

const TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct StatusCounts {
    pub interested: u64,
    pub going: u64,
    pub went: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistStat {
    pub artist_id: Uuid,
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueStat {
    pub venue_id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    pub status_counts: StatusCounts,
    pub total_shows: u64,
    pub average_rating: Option<f64>,
    pub top_artists: Vec<ArtistStat>,
    pub top_venues: Vec<VenueStat>,
    pub shows_by_year: Vec<YearCount>,
    pub total_spent: f64,
    pub spending_by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WrappedData {
    pub year: i32,
    pub total_shows: u64,
    pub average_rating: Option<f64>,
    pub top_artists: Vec<ArtistStat>,
    pub top_venues: Vec<VenueStat>,
    /// Mode of month-of-year over that year's attended shows (1-12);
    /// ties resolve to the earliest month.
    pub busiest_month: Option<u32>,
}

/// Attended (`went`) events with their joins resolved, in event-date order.
struct AttendedShows {
    /// (event, venue) pairs, ordered by date.
    events: Vec<(events::Model, Option<venues::Model>)>,
    /// event id -> artists on the bill.
    lineups: HashMap<Uuid, Vec<artists::Model>>,
    /// ratings from this user's memories, by event id.
    ratings: HashMap<Uuid, i32>,
}

async fn load_attended(
    db: &DatabaseConnection,
    user: UserContext,
) -> Result<(Vec<attendances::Model>, AttendedShows)> {
    let attendance_rows = attendances::Entity::find()
        .filter(attendances::Column::UserId.eq(user.user_id))
        .all(db)
        .await?;

    let went: Vec<&attendances::Model> = attendance_rows
        .iter()
        .filter(|a| a.status == AttendanceStatus::Went.as_str())
        .collect();

    let went_event_ids: Vec<Uuid> = went.iter().map(|a| a.event_id).collect();

    let mut events = events::Entity::find()
        .filter(events::Column::Id.is_in(went_event_ids.clone()))
        .find_also_related(venues::Entity)
        .all(db)
        .await?;
    events.sort_by_key(|(e, _)| e.date);

    let lineup_rows = lineups::Entity::find()
        .filter(lineups::Column::EventId.is_in(went_event_ids.clone()))
        .find_also_related(artists::Entity)
        .all(db)
        .await?;

    let mut lineups: HashMap<Uuid, Vec<artists::Model>> = HashMap::new();
    for (lineup, artist) in lineup_rows {
        if let Some(artist) = artist {
            lineups.entry(lineup.event_id).or_default().push(artist);
        }
    }

    let attendance_ids: Vec<Uuid> = went.iter().map(|a| a.id).collect();
    let attendance_to_event: HashMap<Uuid, Uuid> =
        went.iter().map(|a| (a.id, a.event_id)).collect();

    let memory_rows = memories::Entity::find()
        .filter(memories::Column::AttendanceId.is_in(attendance_ids))
        .all(db)
        .await?;

    let mut ratings = HashMap::new();
    for memory in memory_rows {
        if let (Some(rating), Some(event_id)) =
            (memory.rating, attendance_to_event.get(&memory.attendance_id))
        {
            ratings.insert(*event_id, rating);
        }
    }

    Ok((
        attendance_rows,
        AttendedShows {
            events,
            lineups,
            ratings,
        },
    ))
}

pub async fn personal_stats(db: &DatabaseConnection, user: UserContext) -> Result<StatsData> {
    let (attendance_rows, shows) = load_attended(db, user).await?;

    let mut status_counts = StatusCounts {
        interested: 0,
        going: 0,
        went: 0,
    };
    for row in &attendance_rows {
        match AttendanceStatus::from_str(&row.status) {
            Some(AttendanceStatus::Interested) => status_counts.interested += 1,
            Some(AttendanceStatus::Going) => status_counts.going += 1,
            Some(AttendanceStatus::Went) => status_counts.went += 1,
            None => {}
        }
    }

    let (top_artists, top_venues) = rank_entities(&shows, None);
    let average_rating = average_rating(&shows, None);

    let mut year_counts: Vec<YearCount> = Vec::new();
    for (event, _) in &shows.events {
        let year = event.date.year();
        match year_counts.iter_mut().find(|y| y.year == year) {
            Some(bucket) => bucket.count += 1,
            None => year_counts.push(YearCount { year, count: 1 }),
        }
    }
    year_counts.sort_by_key(|y| y.year);

    let expense_rows = expenses::Entity::find()
        .filter(expenses::Column::UserId.eq(user.user_id))
        .all(db)
        .await?;

    let mut total_spent = 0.0;
    let mut spending_by_category: Vec<CategoryTotal> = Vec::new();
    for expense in &expense_rows {
        total_spent += expense.amount;
        match spending_by_category
            .iter_mut()
            .find(|c| c.category == expense.category)
        {
            Some(bucket) => bucket.total += expense.amount,
            None => spending_by_category.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }

    Ok(StatsData {
        total_shows: status_counts.went,
        status_counts,
        average_rating,
        top_artists,
        top_venues,
        shows_by_year: year_counts,
        total_spent,
        spending_by_category,
    })
}

/// Per-year "Wrapped" view: the same aggregates scoped to one calendar
/// year, plus the busiest month.
pub async fn wrapped(db: &DatabaseConnection, user: UserContext, year: i32) -> Result<WrappedData> {
    let (_, shows) = load_attended(db, user).await?;

    let total_shows = shows
        .events
        .iter()
        .filter(|(e, _)| e.date.year() == year)
        .count() as u64;

    let (top_artists, top_venues) = rank_entities(&shows, Some(year));
    let average_rating = average_rating(&shows, Some(year));

    let mut month_counts = [0u64; 12];
    for (event, _) in &shows.events {
        if event.date.year() == year {
            month_counts[event.date.month0() as usize] += 1;
        }
    }
    let busiest_month = month_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        // max_by_key keeps the later element on ties, so scan in reverse
        // to make the earliest month win.
        .rev()
        .max_by_key(|(_, &count)| count)
        .map(|(idx, _)| idx as u32 + 1);

    Ok(WrappedData {
        year,
        total_shows,
        average_rating,
        top_artists,
        top_venues,
        busiest_month,
    })
}

/// Frequency ranking by entity id, top-5, descending count. The sort is
/// stable, so ties keep their first-seen order from the date-ordered
/// event list.
fn rank_entities(
    shows: &AttendedShows,
    year: Option<i32>,
) -> (Vec<ArtistStat>, Vec<VenueStat>) {
    let mut artist_order: Vec<ArtistStat> = Vec::new();
    let mut artist_index: HashMap<Uuid, usize> = HashMap::new();
    let mut venue_order: Vec<VenueStat> = Vec::new();
    let mut venue_index: HashMap<Uuid, usize> = HashMap::new();

    for (event, venue) in &shows.events {
        if let Some(year) = year {
            if event.date.year() != year {
                continue;
            }
        }

        if let Some(artists) = shows.lineups.get(&event.id) {
            for artist in artists {
                match artist_index.get(&artist.id) {
                    Some(&idx) => artist_order[idx].count += 1,
                    None => {
                        artist_index.insert(artist.id, artist_order.len());
                        artist_order.push(ArtistStat {
                            artist_id: artist.id,
                            name: artist.name.clone(),
                            count: 1,
                        });
                    }
                }
            }
        }

        if let Some(venue) = venue {
            match venue_index.get(&venue.id) {
                Some(&idx) => venue_order[idx].count += 1,
                None => {
                    venue_index.insert(venue.id, venue_order.len());
                    venue_order.push(VenueStat {
                        venue_id: venue.id,
                        name: venue.name.clone(),
                        city: venue.city.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    artist_order.sort_by(|a, b| b.count.cmp(&a.count));
    venue_order.sort_by(|a, b| b.count.cmp(&a.count));
    artist_order.truncate(TOP_N);
    venue_order.truncate(TOP_N);

    (artist_order, venue_order)
}

/// Mean of the user's ratings over attended shows, one decimal place.
/// Unrated attendances are excluded from both numerator and denominator;
/// zero ratings yields `None`, never 0 or NaN.
fn average_rating(shows: &AttendedShows, year: Option<i32>) -> Option<f64> {
    let mut sum = 0i64;
    let mut count = 0i64;

    for (event, _) in &shows.events {
        if let Some(year) = year {
            if event.date.year() != year {
                continue;
            }
        }
        if let Some(&rating) = shows.ratings.get(&event.id) {
            sum += rating as i64;
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some((sum as f64 / count as f64 * 10.0).round() / 10.0)
    }
}

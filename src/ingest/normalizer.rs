//! Maps heterogeneous vendor event payloads into one canonical shape.
//!
//! External data is untrusted: every field here is optional on the wire,
//! and normalization never fails. Unusable input degrades to a sentinel
//! value or drops the event, so a bad vendor response renders as "no
//! results" rather than an error page.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::db::enums::EventSource;
use crate::validate::{optional_text, MAX_CITY_LEN, MAX_COUNTRY_LEN, MAX_NAME_LEN, MAX_URL_LEN};

/// Shown in place of a venue name Ticketmaster has not announced yet.
pub const VENUE_PENDING: &str = "Venue pending confirmation";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub source: EventSource,
    pub source_id: String,
    pub title: Option<String>,
    /// `None` when the vendor date could not be parsed.
    pub starts_at: Option<DateTime<Utc>>,
    /// Raw vendor date string, kept for display when parsing failed.
    pub date_text: Option<String>,
    pub venue: CanonicalVenue,
    pub lineup: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalVenue {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Ticketmaster Discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub dates: Option<TicketmasterDates>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<TicketmasterEmbedded>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterDates {
    #[serde(default)]
    pub start: Option<TicketmasterStart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterStart {
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<String>,
    #[serde(rename = "localDate", default)]
    pub local_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterEmbedded {
    #[serde(default)]
    pub venues: Vec<TicketmasterVenue>,
    #[serde(default)]
    pub attractions: Vec<TicketmasterAttraction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<TicketmasterNamed>,
    #[serde(default)]
    pub country: Option<TicketmasterNamed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterNamed {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterAttraction {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn normalize_ticketmaster(event: &TicketmasterEvent) -> CanonicalEvent {
    let start = event.dates.as_ref().and_then(|d| d.start.as_ref());

    // Prefer the full UTC timestamp; fall back to a midnight-UTC local date.
    let (starts_at, date_text) = match start {
        Some(s) => {
            if let Some(dt) = s.date_time.as_deref() {
                (parse_rfc3339(dt), Some(dt.to_string()))
            } else if let Some(local) = s.local_date.as_deref() {
                let composed = format!("{}T00:00:00Z", local);
                (parse_rfc3339(&composed), Some(local.to_string()))
            } else {
                (None, None)
            }
        }
        None => (None, None),
    };

    let venue = event
        .embedded
        .as_ref()
        .and_then(|e| e.venues.first())
        .map(|v| CanonicalVenue {
            name: optional_text(v.name.as_deref(), MAX_NAME_LEN)
                .or_else(|| Some(VENUE_PENDING.to_string())),
            city: optional_text(
                v.city.as_ref().and_then(|c| c.name.as_deref()),
                MAX_CITY_LEN,
            ),
            country: optional_text(
                v.country.as_ref().and_then(|c| c.name.as_deref()),
                MAX_COUNTRY_LEN,
            ),
        })
        .unwrap_or_default();

    let lineup = event
        .embedded
        .as_ref()
        .map(|e| {
            e.attractions
                .iter()
                .filter_map(|a| optional_text(a.name.as_deref(), MAX_NAME_LEN))
                .collect()
        })
        .unwrap_or_default();

    CanonicalEvent {
        source: EventSource::Ticketmaster,
        source_id: event.id.clone().unwrap_or_default(),
        title: optional_text(event.name.as_deref(), MAX_NAME_LEN),
        starts_at,
        date_text,
        venue,
        lineup,
        url: optional_text(event.url.as_deref(), MAX_URL_LEN),
    }
}

// ---------------------------------------------------------------------------
// Setlist.fm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Setlist {
    #[serde(default)]
    pub id: Option<String>,
    /// `DD-MM-YYYY`
    #[serde(rename = "eventDate", default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub artist: Option<SetlistArtist>,
    #[serde(default)]
    pub venue: Option<SetlistVenue>,
    #[serde(default)]
    pub sets: Option<SetlistSets>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<SetlistCity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistCity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<SetlistCountry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistCountry {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistSets {
    #[serde(default)]
    pub set: Vec<SetlistSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistSet {
    #[serde(default)]
    pub song: Vec<SetlistSong>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetlistSong {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn normalize_setlistfm(setlist: &Setlist) -> CanonicalEvent {
    // Setlist.fm dates arrive day-first; reparse before treating as UTC.
    let starts_at = setlist
        .event_date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%d-%m-%Y").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive));

    let artist_name = setlist
        .artist
        .as_ref()
        .and_then(|a| optional_text(a.name.as_deref(), MAX_NAME_LEN));

    let venue = setlist
        .venue
        .as_ref()
        .map(|v| CanonicalVenue {
            name: optional_text(v.name.as_deref(), MAX_NAME_LEN),
            city: optional_text(
                v.city.as_ref().and_then(|c| c.name.as_deref()),
                MAX_CITY_LEN,
            ),
            country: optional_text(
                v.city
                    .as_ref()
                    .and_then(|c| c.country.as_ref())
                    .and_then(|c| c.name.as_deref()),
                MAX_COUNTRY_LEN,
            ),
        })
        .unwrap_or_default();

    CanonicalEvent {
        source: EventSource::Setlistfm,
        source_id: setlist.id.clone().unwrap_or_default(),
        title: artist_name
            .as_ref()
            .zip(venue.name.as_ref())
            .map(|(a, v)| format!("{} @ {}", a, v)),
        starts_at,
        date_text: setlist.event_date.clone(),
        venue,
        lineup: artist_name.into_iter().collect(),
        url: optional_text(setlist.url.as_deref(), MAX_URL_LEN),
    }
}

/// Flatten a setlist's nested sets into one ordered song list.
pub fn flatten_songs(setlist: &Setlist) -> Vec<String> {
    setlist
        .sets
        .as_ref()
        .map(|sets| {
            sets.set
                .iter()
                .flat_map(|s| s.song.iter())
                .filter_map(|song| optional_text(song.name.as_deref(), MAX_NAME_LEN))
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Last.fm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastfmEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text date; parsing is best effort.
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub venue: Option<LastfmVenue>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastfmVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Normalize one Last.fm event, dropping it when its parsed date is in the
/// past. The vendor is expected to return only future events; the filter is
/// defensive. An unparseable date keeps the event, with the raw string
/// carried in `date_text` for display.
pub fn normalize_lastfm(event: &LastfmEvent, now: DateTime<Utc>) -> Option<CanonicalEvent> {
    let starts_at = event.start_date.as_deref().and_then(parse_freeform_date);

    if let Some(parsed) = starts_at {
        if parsed < now {
            return None;
        }
    }

    let venue = event
        .venue
        .as_ref()
        .map(|v| CanonicalVenue {
            name: optional_text(v.name.as_deref(), MAX_NAME_LEN),
            city: optional_text(v.city.as_deref(), MAX_CITY_LEN),
            country: optional_text(v.country.as_deref(), MAX_COUNTRY_LEN),
        })
        .unwrap_or_default();

    Some(CanonicalEvent {
        source: EventSource::Lastfm,
        source_id: event.id.clone().unwrap_or_default(),
        title: optional_text(event.title.as_deref(), MAX_NAME_LEN),
        starts_at,
        date_text: event.start_date.clone(),
        venue,
        lineup: event
            .artists
            .iter()
            .filter_map(|a| optional_text(Some(a), MAX_NAME_LEN))
            .collect(),
        url: optional_text(event.url.as_deref(), MAX_URL_LEN),
    })
}

// ---------------------------------------------------------------------------
// Bandsintown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BandsintownEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub venue: Option<BandsintownVenue>,
    #[serde(default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BandsintownVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

pub fn normalize_bandsintown(event: &BandsintownEvent) -> CanonicalEvent {
    // Bandsintown datetimes come without an offset; treat as UTC.
    let starts_at = event.datetime.as_deref().and_then(|raw| {
        parse_rfc3339(raw).or_else(|| {
            NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
    });

    let venue = event
        .venue
        .as_ref()
        .map(|v| CanonicalVenue {
            name: optional_text(v.name.as_deref(), MAX_NAME_LEN),
            city: optional_text(v.city.as_deref(), MAX_CITY_LEN),
            country: optional_text(v.country.as_deref(), MAX_COUNTRY_LEN),
        })
        .unwrap_or_default();

    CanonicalEvent {
        source: EventSource::Bandsintown,
        source_id: event.id.clone().unwrap_or_default(),
        title: optional_text(event.title.as_deref(), MAX_NAME_LEN),
        starts_at,
        date_text: event.datetime.clone(),
        venue,
        lineup: event
            .lineup
            .iter()
            .filter_map(|a| optional_text(Some(a), MAX_NAME_LEN))
            .collect(),
        url: optional_text(event.url.as_deref(), MAX_URL_LEN),
    }
}

// ---------------------------------------------------------------------------
// Date parsing helpers
// ---------------------------------------------------------------------------

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Best-effort parse of a free-text vendor date.
fn parse_freeform_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = parse_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%d %b %Y, %H:%M", "%d %b %Y"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ticketmaster_prefers_full_datetime() {
        let event: TicketmasterEvent = serde_json::from_value(serde_json::json!({
            "id": "tm-1",
            "name": "Artist X Live",
            "dates": {
                "start": {
                    "dateTime": "2025-06-01T20:00:00Z",
                    "localDate": "2025-06-01"
                }
            },
            "_embedded": {
                "venues": [{"name": "Teatro Y"}],
                "attractions": [{"name": "Artist X"}]
            }
        }))
        .unwrap();

        let canonical = normalize_ticketmaster(&event);
        assert_eq!(
            canonical.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap())
        );
        assert_eq!(canonical.venue.name.as_deref(), Some("Teatro Y"));
        assert_eq!(canonical.lineup, vec!["Artist X"]);
    }

    #[test]
    fn ticketmaster_composes_local_date_at_midnight_utc() {
        let event: TicketmasterEvent = serde_json::from_value(serde_json::json!({
            "dates": {"start": {"localDate": "2025-06-01"}},
            "_embedded": {"venues": [{"name": "Somewhere"}]}
        }))
        .unwrap();

        let canonical = normalize_ticketmaster(&event);
        assert_eq!(
            canonical.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn ticketmaster_missing_venue_name_gets_sentinel() {
        let event: TicketmasterEvent = serde_json::from_value(serde_json::json!({
            "_embedded": {"venues": [{"city": {"name": "Madrid"}}]}
        }))
        .unwrap();

        let canonical = normalize_ticketmaster(&event);
        assert_eq!(canonical.venue.name.as_deref(), Some(VENUE_PENDING));
        assert_eq!(canonical.venue.city.as_deref(), Some("Madrid"));
    }

    #[test]
    fn ticketmaster_empty_payload_does_not_panic() {
        let event: TicketmasterEvent = serde_json::from_value(serde_json::json!({})).unwrap();
        let canonical = normalize_ticketmaster(&event);
        assert!(canonical.starts_at.is_none());
        assert!(canonical.venue.name.is_none());
    }

    #[test]
    fn setlistfm_reparses_day_first_date() {
        let setlist: Setlist = serde_json::from_value(serde_json::json!({
            "id": "sl-1",
            "eventDate": "01-06-2025",
            "artist": {"name": "Artist X"},
            "venue": {"name": "Teatro Y", "city": {"name": "Lima", "country": {"name": "Peru"}}}
        }))
        .unwrap();

        let canonical = normalize_setlistfm(&setlist);
        assert_eq!(
            canonical.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(canonical.venue.country.as_deref(), Some("Peru"));
        assert_eq!(canonical.title.as_deref(), Some("Artist X @ Teatro Y"));
    }

    #[test]
    fn setlistfm_songs_flatten_across_sets() {
        let setlist: Setlist = serde_json::from_value(serde_json::json!({
            "sets": {"set": [
                {"song": [{"name": "Opener"}, {"name": "Deep Cut"}]},
                {"song": [{"name": "Encore"}]}
            ]}
        }))
        .unwrap();

        assert_eq!(flatten_songs(&setlist), vec!["Opener", "Deep Cut", "Encore"]);
    }

    #[test]
    fn lastfm_unparseable_date_keeps_event_with_raw_text() {
        let event = LastfmEvent {
            title: Some("Mystery Fest".to_string()),
            start_date: Some("sometime next summer".to_string()),
            ..Default::default()
        };

        let canonical = normalize_lastfm(&event, Utc::now()).expect("event kept");
        assert!(canonical.starts_at.is_none());
        assert_eq!(canonical.date_text.as_deref(), Some("sometime next summer"));
    }

    #[test]
    fn lastfm_past_events_are_dropped() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let event = LastfmEvent {
            start_date: Some("2024-01-15T20:00:00Z".to_string()),
            ..Default::default()
        };

        assert!(normalize_lastfm(&event, now).is_none());
    }

    #[test]
    fn lastfm_parses_human_readable_dates() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let event = LastfmEvent {
            start_date: Some("01 Jun 2025".to_string()),
            ..Default::default()
        };

        let canonical = normalize_lastfm(&event, now).unwrap();
        assert_eq!(
            canonical.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bandsintown_accepts_offsetless_datetime() {
        let event: BandsintownEvent = serde_json::from_value(serde_json::json!({
            "id": "bit-1",
            "datetime": "2025-07-04T21:30:00",
            "venue": {"name": "Open Air", "city": "Berlin", "country": "Germany"},
            "lineup": ["Headliner", "Support"]
        }))
        .unwrap();

        let canonical = normalize_bandsintown(&event);
        assert_eq!(
            canonical.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 7, 4, 21, 30, 0).unwrap())
        );
        assert_eq!(canonical.lineup.len(), 2);
    }
}

use maud::{html, Markup};
use uuid::Uuid;

use crate::db::enums::AttendanceStatus;

pub struct EventCardData {
    pub id: Uuid,
    pub name: String,
    pub date_line: String,
    pub venue_line: Option<String>,
    pub status: Option<AttendanceStatus>,
}

pub struct ArtistCardData {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

pub fn event_card(event: &EventCardData) -> Markup {
    html! {
        a href={(format!("/events/{}", event.id))}
          class="event-card block bg-white rounded-lg shadow-md overflow-hidden" {
            div class="p-4" {
                div class="flex justify-between items-start" {
                    h3 class="font-semibold text-gray-900 truncate" title=(event.name) {
                        (event.name)
                    }
                    @if let Some(status) = &event.status {
                        (status_badge(status))
                    }
                }
                p class="text-sm text-gray-600 mt-1" { (event.date_line) }
                @if let Some(venue) = &event.venue_line {
                    p class="text-xs text-gray-500 mt-1 truncate" { (venue) }
                }
            }
        }
    }
}

pub fn status_badge(status: &AttendanceStatus) -> Markup {
    let (text, color) = match status {
        AttendanceStatus::Interested => ("Interested", "bg-gray-500"),
        AttendanceStatus::Going => ("Going", "bg-blue-500"),
        AttendanceStatus::Went => ("Went", "bg-green-500"),
    };

    html! {
        span class=(format!("{} text-white text-xs px-2 py-1 rounded-full", color)) {
            (text)
        }
    }
}

/// The three status buttons; each one PUTs the attendance via HTMX and
/// swaps the badge area in place.
pub fn status_buttons(event_id: Uuid, current: Option<&AttendanceStatus>) -> Markup {
    html! {
        div id="attendance-buttons" class="flex space-x-2" {
            @for status in [
                AttendanceStatus::Interested,
                AttendanceStatus::Going,
                AttendanceStatus::Went,
            ] {
                @let active = current == Some(&status);
                button
                    class=(if active {
                        "px-3 py-1 rounded-md text-sm font-medium bg-gray-900 text-white"
                    } else {
                        "px-3 py-1 rounded-md text-sm font-medium bg-gray-100 text-gray-700 hover:bg-gray-200"
                    })
                    hx-put={(format!("/api/events/{}/attendance", event_id))}
                    hx-vals={(format!("{{\"status\": \"{}\"}}", status.as_str()))}
                    hx-ext="json-enc"
                    hx-target="#attendance-buttons"
                    hx-swap="outerHTML" {
                    (status_label(&status))
                }
            }
        }
    }
}

fn status_label(status: &AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Interested => "Interested",
        AttendanceStatus::Going => "Going",
        AttendanceStatus::Went => "Went",
    }
}

pub fn rating_stars(rating: i32) -> Markup {
    html! {
        span class="text-yellow-500" {
            @for i in 1..=5 {
                @if i <= rating { "★" } @else { "☆" }
            }
        }
    }
}

pub fn artist_card(artist: &ArtistCardData) -> Markup {
    html! {
        a href={(format!("/artists/{}", artist.id))}
          class="event-card block bg-white rounded-lg shadow-md overflow-hidden" {
            @if let Some(url) = &artist.image_url {
                div class="aspect-square" {
                    img src=(url) alt=(artist.name) class="w-full h-full object-cover" loading="lazy";
                }
            }
            div class="p-4" {
                h3 class="font-semibold text-gray-900 truncate" { (artist.name) }
                @if let Some(genre) = &artist.genre {
                    p class="text-sm text-gray-600" { (genre) }
                }
            }
        }
    }
}

pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-lg mb-4" {
            (message)
        }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        div class="text-center py-12" {
            p class="text-gray-600 text-lg" { (message) }
        }
    }
}

pub fn status_filter_bar(active: Option<&str>) -> Markup {
    html! {
        div class="flex space-x-2 mb-6" {
            (filter_link("All", "/", active.is_none()))
            @for (label, value) in [
                ("Interested", "interested"),
                ("Going", "going"),
                ("Went", "went"),
            ] {
                (filter_link(label, &format!("/?status={}", value), active == Some(value)))
            }
        }
    }
}

fn filter_link(label: &str, href: &str, active: bool) -> Markup {
    html! {
        a href=(href)
          class=(if active {
              "px-3 py-1 rounded-full text-sm font-medium bg-gray-900 text-white"
          } else {
              "px-3 py-1 rounded-full text-sm font-medium bg-white text-gray-700 shadow-sm hover:bg-gray-100"
          }) {
            (label)
        }
    }
}

use maud::{html, Markup};
use uuid::Uuid;

use crate::db::enums::AttendanceStatus;
use crate::services::stats::{StatsData, WrappedData};

use super::components::{
    artist_card, empty_state, event_card, rating_stars, status_buttons, status_filter_bar,
    ArtistCardData, EventCardData,
};
use super::layout::base_layout;

pub fn home_page(events: Vec<EventCardData>, active_filter: Option<&str>) -> Markup {
    base_layout(
        "Shows",
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-2xl font-bold text-gray-900" { "Your shows" }
            }

            (status_filter_bar(active_filter))

            @if events.is_empty() {
                (empty_state("No shows yet. Import one from search, or add it by hand."))
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6" {
                    @for event in &events {
                        (event_card(event))
                    }
                }
            }
        },
    )
}

pub struct EventDetailData {
    pub id: Uuid,
    pub name: String,
    pub date_line: String,
    pub venue_line: Option<String>,
    pub source_url: Option<String>,
    pub lineup: Vec<(Uuid, String)>,
    pub status: Option<AttendanceStatus>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub notes: Option<String>,
    pub photos: Vec<PhotoView>,
}

pub struct PhotoView {
    pub url: Option<String>,
    pub caption: Option<String>,
}

pub fn event_detail_page(event: EventDetailData) -> Markup {
    base_layout(
        &event.name,
        html! {
            div id="notification-area" class="mb-4" {}

            div class="bg-white rounded-lg shadow-md p-6" {
                div class="flex justify-between items-start" {
                    div {
                        h1 class="text-2xl font-bold text-gray-900" { (event.name) }
                        p class="text-gray-600 mt-1" { (event.date_line) }
                        @if let Some(venue) = &event.venue_line {
                            p class="text-gray-500 mt-1" { (venue) }
                        }
                    }
                    (status_buttons(event.id, event.status.as_ref()))
                }

                @if !event.lineup.is_empty() {
                    div class="mt-6" {
                        h2 class="text-sm font-medium text-gray-500" { "Lineup" }
                        div class="flex flex-wrap gap-2 mt-2" {
                            @for (artist_id, name) in &event.lineup {
                                a href={(format!("/artists/{}", artist_id))}
                                  class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded hover:bg-gray-200" {
                                    (name)
                                }
                            }
                        }
                    }
                }

                @if let Some(url) = &event.source_url {
                    div class="mt-4" {
                        a href=(url) target="_blank" class="text-primary text-sm hover:underline" {
                            "Event page"
                        }
                    }
                }
            }

            // Memory: rating, review, notes
            div class="bg-white rounded-lg shadow-md p-6 mt-6" {
                h2 class="text-lg font-semibold text-gray-900 mb-4" { "Memory" }

                @if let Some(rating) = event.rating {
                    div class="mb-2" { (rating_stars(rating)) }
                }
                @if let Some(review) = &event.review {
                    p class="text-gray-700 mb-4" { (review) }
                }

                form
                    hx-put={(format!("/api/events/{}/memory", event.id))}
                    hx-ext="json-enc"
                    hx-target="#notification-area" {
                    div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                        div {
                            label class="block text-sm font-medium text-gray-700" { "Rating (1-5)" }
                            input type="number" name="rating" min="1" max="5"
                                  value=[event.rating]
                                  class="mt-1 block w-full rounded-md border-gray-300 shadow-sm";
                        }
                        div class="md:col-span-2" {
                            label class="block text-sm font-medium text-gray-700" { "Review" }
                            textarea name="review" rows="2"
                                     class="mt-1 block w-full rounded-md border-gray-300 shadow-sm" {
                                (event.review.as_deref().unwrap_or(""))
                            }
                        }
                    }
                    div class="mt-4" {
                        label class="block text-sm font-medium text-gray-700" { "Notes" }
                        textarea name="notes" rows="2"
                                 class="mt-1 block w-full rounded-md border-gray-300 shadow-sm" {
                            (event.notes.as_deref().unwrap_or(""))
                        }
                    }
                    button type="submit"
                           class="mt-4 px-4 py-2 bg-gray-900 text-white rounded-md text-sm font-medium hover:bg-gray-700" {
                        "Save memory"
                    }
                }
            }

            @if !event.photos.is_empty() {
                div class="bg-white rounded-lg shadow-md p-6 mt-6" {
                    h2 class="text-lg font-semibold text-gray-900 mb-4" { "Photos" }
                    div class="grid grid-cols-2 md:grid-cols-4 gap-4" {
                        @for photo in &event.photos {
                            div {
                                @if let Some(url) = &photo.url {
                                    img src=(url) class="w-full rounded-lg object-cover aspect-square" loading="lazy";
                                }
                                @if let Some(caption) = &photo.caption {
                                    p class="text-xs text-gray-500 mt-1" { (caption) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: Vec<ArtistCardData>) -> Markup {
    base_layout(
        "Artists",
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { "Artists" }

            @if artists.is_empty() {
                (empty_state("No artists yet. They appear here once you track a show."))
            } @else {
                div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-6" {
                    @for artist in &artists {
                        (artist_card(artist))
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(
    artist: &ArtistCardData,
    events: Vec<EventCardData>,
    on_wishlist: bool,
) -> Markup {
    base_layout(
        &artist.name,
        html! {
            div class="bg-white rounded-lg shadow-md p-6" {
                div class="flex items-center space-x-4" {
                    @if let Some(url) = &artist.image_url {
                        img src=(url) alt=(artist.name)
                            class="w-24 h-24 rounded-full object-cover";
                    }
                    div {
                        h1 class="text-2xl font-bold text-gray-900" { (artist.name) }
                        @if let Some(genre) = &artist.genre {
                            p class="text-gray-600" { (genre) }
                        }
                    }
                    @if on_wishlist {
                        span class="px-2 py-1 bg-pink-100 text-pink-700 text-xs rounded-full" {
                            "On wishlist"
                        }
                    }
                }
            }

            div class="mt-8" {
                h2 class="text-lg font-semibold text-gray-900 mb-4" { "Shows" }
                @if events.is_empty() {
                    (empty_state("No shows with this artist yet."))
                } @else {
                    div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6" {
                        @for event in &events {
                            (event_card(event))
                        }
                    }
                }
            }
        },
    )
}

pub fn stats_page(stats: &StatsData) -> Markup {
    base_layout(
        "Stats",
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { "Your stats" }

            div class="grid grid-cols-2 md:grid-cols-4 gap-6 mb-8" {
                (stat_card("Shows attended", &stats.status_counts.went.to_string()))
                (stat_card("Going", &stats.status_counts.going.to_string()))
                (stat_card("Interested", &stats.status_counts.interested.to_string()))
                (stat_card(
                    "Average rating",
                    &stats
                        .average_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "—".to_string()),
                ))
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-8" {
                div class="bg-white rounded-lg shadow-md p-6" {
                    h2 class="text-lg font-semibold text-gray-900 mb-4" { "Top artists" }
                    @if stats.top_artists.is_empty() {
                        p class="text-gray-500" { "Nothing yet." }
                    } @else {
                        ol class="space-y-2" {
                            @for artist in &stats.top_artists {
                                li class="flex justify-between" {
                                    span { (artist.name) }
                                    span class="text-gray-500" { (artist.count) " shows" }
                                }
                            }
                        }
                    }
                }

                div class="bg-white rounded-lg shadow-md p-6" {
                    h2 class="text-lg font-semibold text-gray-900 mb-4" { "Top venues" }
                    @if stats.top_venues.is_empty() {
                        p class="text-gray-500" { "Nothing yet." }
                    } @else {
                        ol class="space-y-2" {
                            @for venue in &stats.top_venues {
                                li class="flex justify-between" {
                                    span {
                                        (venue.name)
                                        @if let Some(city) = &venue.city {
                                            span class="text-gray-400 text-sm" { " · " (city) }
                                        }
                                    }
                                    span class="text-gray-500" { (venue.count) }
                                }
                            }
                        }
                    }
                }
            }

            div class="bg-white rounded-lg shadow-md p-6 mt-8" {
                h2 class="text-lg font-semibold text-gray-900 mb-4" { "Shows by year" }
                div class="flex space-x-6" {
                    @for bucket in &stats.shows_by_year {
                        a href={(format!("/wrapped/{}", bucket.year))} class="text-center hover:text-primary" {
                            div class="text-2xl font-bold" { (bucket.count) }
                            div class="text-sm text-gray-500" { (bucket.year) }
                        }
                    }
                }
            }

            div class="bg-white rounded-lg shadow-md p-6 mt-8" {
                h2 class="text-lg font-semibold text-gray-900 mb-4" { "Spending" }
                div class="text-2xl font-bold mb-2" { (format!("{:.2}", stats.total_spent)) }
                div class="space-y-1" {
                    @for cat in &stats.spending_by_category {
                        div class="flex justify-between text-sm" {
                            span class="text-gray-600" { (cat.category) }
                            span { (format!("{:.2}", cat.total)) }
                        }
                    }
                }
            }
        },
    )
}

pub fn wrapped_page(wrapped: &WrappedData) -> Markup {
    let month_name = wrapped.busiest_month.map(|m| {
        [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ][(m - 1) as usize]
    });

    base_layout(
        &format!("Wrapped {}", wrapped.year),
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" {
                "Your " (wrapped.year) " wrapped"
            }

            div class="grid grid-cols-1 md:grid-cols-3 gap-6 mb-8" {
                (stat_card("Shows", &wrapped.total_shows.to_string()))
                (stat_card(
                    "Average rating",
                    &wrapped
                        .average_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "—".to_string()),
                ))
                (stat_card("Busiest month", month_name.unwrap_or("—")))
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-8" {
                div class="bg-white rounded-lg shadow-md p-6" {
                    h2 class="text-lg font-semibold text-gray-900 mb-4" { "Top artists" }
                    ol class="space-y-2" {
                        @for artist in &wrapped.top_artists {
                            li class="flex justify-between" {
                                span { (artist.name) }
                                span class="text-gray-500" { (artist.count) }
                            }
                        }
                    }
                }
                div class="bg-white rounded-lg shadow-md p-6" {
                    h2 class="text-lg font-semibold text-gray-900 mb-4" { "Top venues" }
                    ol class="space-y-2" {
                        @for venue in &wrapped.top_venues {
                            li class="flex justify-between" {
                                span { (venue.name) }
                                span class="text-gray-500" { (venue.count) }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn stat_card(label: &str, value: &str) -> Markup {
    html! {
        div class="bg-white rounded-lg shadow-md p-6 text-center" {
            div class="text-3xl font-bold text-gray-900" { (value) }
            div class="text-sm text-gray-500 mt-1" { (label) }
        }
    }
}

pub mod artists;
pub mod events;
pub mod expenses;
pub mod festivals;
pub mod health;
pub mod html;
pub mod search;
pub mod stats;
pub mod venues;
pub mod wishlist;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Event endpoints
        .route("/events", get(events::list_events))
        .route("/events", post(events::create_event))
        .route("/events/import", post(events::import_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id", patch(events::update_event))
        .route("/events/:id", delete(events::delete_event))
        .route("/events/:id/lineup", post(events::add_lineup_artist))
        .route(
            "/events/:id/lineup/:artist_id",
            delete(events::remove_lineup_artist),
        )
        .route("/events/:id/attendance", put(events::set_attendance))
        .route("/events/:id/memory", put(events::save_memory))
        .route("/events/:id/photos", get(events::list_photos))
        .route("/events/:id/photos", post(events::add_photo))

        // Artist endpoints
        .route("/artists", get(artists::list_artists))
        .route("/artists", post(artists::create_artist))
        .route("/artists/:id", get(artists::get_artist))
        .route("/artists/:id", patch(artists::update_artist))
        .route("/artists/:id", delete(artists::delete_artist))
        .route("/artists/:id/enrich", get(artists::enrich_artist))
        .route("/artists/:id/setlists", get(artists::get_setlists))

        // Venue endpoints
        .route("/venues", get(venues::list_venues))
        .route("/venues", post(venues::create_venue))
        .route("/venues/:id", get(venues::get_venue))
        .route("/venues/:id", patch(venues::update_venue))
        .route("/venues/:id", delete(venues::delete_venue))

        // Expense endpoints
        .route("/expenses", get(expenses::list_expenses))
        .route("/expenses", post(expenses::create_expense))
        .route("/expenses/:id", patch(expenses::update_expense))
        .route("/expenses/:id", delete(expenses::delete_expense))

        // Festival endpoints
        .route("/festivals", get(festivals::list_festivals))
        .route("/festivals", post(festivals::create_festival))
        .route("/festivals/:id", get(festivals::get_festival))
        .route("/festivals/:id", patch(festivals::update_festival))
        .route("/festivals/:id", delete(festivals::delete_festival))
        .route("/festivals/:id/events", post(festivals::attach_event))
        .route("/festivals/:id/attendance", put(festivals::set_attendance))

        // Wishlist endpoints
        .route("/wishlist", get(wishlist::list_wishlist))
        .route("/wishlist/:artist_id", put(wishlist::add_to_wishlist))
        .route("/wishlist/:artist_id", delete(wishlist::remove_from_wishlist))

        // Statistics
        .route("/stats", get(stats::get_stats))
        .route("/stats/wrapped/:year", get(stats::get_wrapped))

        // External search fan-out
        .route("/search/events", get(search::search_events))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))
        .route("/events/:id", get(html::event_detail))
        .route("/artists", get(html::artists_index))
        .route("/artists/:id", get(html::artist_detail))
        .route("/stats", get(html::stats_page_handler))
        .route("/wrapped/:year", get(html::wrapped_page_handler))
}

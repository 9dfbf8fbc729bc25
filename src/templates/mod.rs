pub mod components;
pub mod layout;
pub mod pages;

pub use components::{ArtistCardData, EventCardData};
pub use pages::{
    artist_detail_page, artists_page, event_detail_page, home_page, stats_page, wrapped_page,
    EventDetailData, PhotoView,
};

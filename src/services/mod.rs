pub mod attendance;
pub mod bandsintown;
pub mod events;
pub mod lastfm;
pub mod setlistfm;
pub mod spotify;
pub mod stats;
pub mod ticketmaster;

pub use bandsintown::BandsintownService;
pub use lastfm::LastfmService;
pub use setlistfm::SetlistFmService;
pub use spotify::SpotifyService;
pub use ticketmaster::TicketmasterService;

pub mod artists;
pub mod venues;
pub mod events;
pub mod lineups;
pub mod attendances;
pub mod memories;
pub mod expenses;
pub mod festivals;
pub mod festival_events;
pub mod festival_attendances;
pub mod wishlist_artists;
pub mod event_photos;

pub use artists::Entity as Artists;
pub use venues::Entity as Venues;
pub use events::Entity as Events;
pub use lineups::Entity as Lineups;
pub use attendances::Entity as Attendances;
pub use memories::Entity as Memories;
pub use expenses::Entity as Expenses;
pub use festivals::Entity as Festivals;
pub use festival_events::Entity as FestivalEvents;
pub use festival_attendances::Entity as FestivalAttendances;
pub use wishlist_artists::Entity as WishlistArtists;
pub use event_photos::Entity as EventPhotos;

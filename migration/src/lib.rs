pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_artists_table;
mod m20250301_000002_create_venues_table;
mod m20250301_000003_create_events_table;
mod m20250301_000004_create_lineups_table;
mod m20250301_000005_create_attendances_table;
mod m20250301_000006_create_memories_table;
mod m20250301_000007_create_expenses_table;
mod m20250301_000008_create_festivals_table;
mod m20250301_000009_create_festival_events_table;
mod m20250301_000010_create_festival_attendances_table;
mod m20250301_000011_create_wishlist_artists_table;
mod m20250301_000012_create_event_photos_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_artists_table::Migration),
            Box::new(m20250301_000002_create_venues_table::Migration),
            Box::new(m20250301_000003_create_events_table::Migration),
            Box::new(m20250301_000004_create_lineups_table::Migration),
            Box::new(m20250301_000005_create_attendances_table::Migration),
            Box::new(m20250301_000006_create_memories_table::Migration),
            Box::new(m20250301_000007_create_expenses_table::Migration),
            Box::new(m20250301_000008_create_festivals_table::Migration),
            Box::new(m20250301_000009_create_festival_events_table::Migration),
            Box::new(m20250301_000010_create_festival_attendances_table::Migration),
            Box::new(m20250301_000011_create_wishlist_artists_table::Migration),
            Box::new(m20250301_000012_create_event_photos_table::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_artists_table::Artists;
use super::m20250301_000003_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lineups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lineups::EventId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lineups::ArtistId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Lineups::EventId)
                            .col(Lineups::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lineups_event_id")
                            .from(Lineups::Table, Lineups::EventId)
                            .to(Events::Table, Events::Id)
                            // Lineup rows are removed by the application
                            // strictly before their event row.
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lineups_artist_id")
                            .from(Lineups::Table, Lineups::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lineups_artist_id")
                    .table(Lineups::Table)
                    .col(Lineups::ArtistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lineups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lineups {
    Table,
    EventId,
    ArtistId,
}

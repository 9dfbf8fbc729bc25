use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_events_table::Events;
use super::m20250301_000008_create_festivals_table::Festivals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FestivalEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FestivalEvents::FestivalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FestivalEvents::EventId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FestivalEvents::DayLabel)
                            .string_len(100),
                    )
                    .primary_key(
                        Index::create()
                            .col(FestivalEvents::FestivalId)
                            .col(FestivalEvents::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_festival_events_festival_id")
                            .from(FestivalEvents::Table, FestivalEvents::FestivalId)
                            .to(Festivals::Table, Festivals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_festival_events_event_id")
                            .from(FestivalEvents::Table, FestivalEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_festival_events_event_id")
                    .table(FestivalEvents::Table)
                    .col(FestivalEvents::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FestivalEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FestivalEvents {
    Table,
    FestivalId,
    EventId,
    DayLabel,
}

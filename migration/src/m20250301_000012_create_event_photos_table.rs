use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventPhotos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventPhotos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventPhotos::EventId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventPhotos::StoragePath)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventPhotos::Caption)
                            .string_len(300),
                    )
                    .col(
                        ColumnDef::new(EventPhotos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventPhotos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_photos_event_id")
                            .from(EventPhotos::Table, EventPhotos::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_photos_event_id")
                    .table(EventPhotos::Table)
                    .col(EventPhotos::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventPhotos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventPhotos {
    Table,
    Id,
    EventId,
    StoragePath,
    Caption,
    CreatedAt,
    UpdatedAt,
}

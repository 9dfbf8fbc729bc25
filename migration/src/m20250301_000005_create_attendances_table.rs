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
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendances::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attendances::EventId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendances::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendances::Status)
                            .string_len(20)
                            .not_null()
                            .default("interested"),
                    )
                    .col(
                        ColumnDef::new(Attendances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendances::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendances_event_id")
                            .from(Attendances::Table, Attendances::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One attendance row per (event, user).
        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_event_user")
                    .table(Attendances::Table)
                    .col(Attendances::EventId)
                    .col(Attendances::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_user_id")
                    .table(Attendances::Table)
                    .col(Attendances::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Attendances {
    Table,
    Id,
    EventId,
    UserId,
    Status,
    CreatedAt,
    UpdatedAt,
}

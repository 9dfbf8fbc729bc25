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
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Amount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Category)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Note)
                            .string_len(500),
                    )
                    .col(
                        ColumnDef::new(Expenses::EventId)
                            .uuid(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_event_id")
                            .from(Expenses::Table, Expenses::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_id")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_event_id")
                    .table(Expenses::Table)
                    .col(Expenses::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Expenses {
    Table,
    Id,
    UserId,
    Amount,
    Category,
    Note,
    EventId,
    Date,
    CreatedAt,
    UpdatedAt,
}

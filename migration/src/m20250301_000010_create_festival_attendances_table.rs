use sea_orm_migration::prelude::*;

use super::m20250301_000008_create_festivals_table::Festivals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FestivalAttendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FestivalAttendances::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::FestivalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::Status)
                            .string_len(20)
                            .not_null()
                            .default("interested"),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::Rating)
                            .integer(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::Review)
                            .text(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FestivalAttendances::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_festival_attendances_festival_id")
                            .from(
                                FestivalAttendances::Table,
                                FestivalAttendances::FestivalId,
                            )
                            .to(Festivals::Table, Festivals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_festival_attendances_festival_user")
                    .table(FestivalAttendances::Table)
                    .col(FestivalAttendances::FestivalId)
                    .col(FestivalAttendances::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(FestivalAttendances::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum FestivalAttendances {
    Table,
    Id,
    FestivalId,
    UserId,
    Status,
    Rating,
    Review,
    CreatedAt,
    UpdatedAt,
}

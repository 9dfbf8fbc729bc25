use sea_orm_migration::prelude::*;

use super::m20250301_000005_create_attendances_table::Attendances;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Memories::AttendanceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Memories::Rating)
                            .integer(),
                    )
                    .col(
                        ColumnDef::new(Memories::Review)
                            .text(),
                    )
                    .col(
                        ColumnDef::new(Memories::Notes)
                            .text(),
                    )
                    .col(
                        ColumnDef::new(Memories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Memories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memories_attendance_id")
                            .from(Memories::Table, Memories::AttendanceId)
                            .to(Attendances::Table, Attendances::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One memory per attendance.
        manager
            .create_index(
                Index::create()
                    .name("idx_memories_attendance_id")
                    .table(Memories::Table)
                    .col(Memories::AttendanceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Memories {
    Table,
    Id,
    AttendanceId,
    Rating,
    Review,
    Notes,
    CreatedAt,
    UpdatedAt,
}

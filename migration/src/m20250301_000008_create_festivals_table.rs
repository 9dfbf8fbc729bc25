use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Festivals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Festivals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Festivals::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Festivals::City)
                            .string_len(120),
                    )
                    .col(
                        ColumnDef::new(Festivals::Country)
                            .string_len(120),
                    )
                    .col(
                        ColumnDef::new(Festivals::StartDate)
                            .date(),
                    )
                    .col(
                        ColumnDef::new(Festivals::EndDate)
                            .date(),
                    )
                    .col(
                        ColumnDef::new(Festivals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Festivals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Festivals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Festivals {
    Table,
    Id,
    Name,
    City,
    Country,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artists::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Artists::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Artists::NameNormalized)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Artists::Genre)
                            .string_len(120),
                    )
                    .col(
                        ColumnDef::new(Artists::ImageUrl)
                            .string_len(500),
                    )
                    .col(
                        ColumnDef::new(Artists::SpotifyId)
                            .string_len(100),
                    )
                    .col(
                        ColumnDef::new(Artists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Artists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Entity resolution dedups on the normalized name; the constraint
        // turns concurrent same-name creation into a catchable conflict.
        manager
            .create_index(
                Index::create()
                    .name("idx_artists_name_normalized")
                    .table(Artists::Table)
                    .col(Artists::NameNormalized)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artists {
    Table,
    Id,
    Name,
    NameNormalized,
    Genre,
    ImageUrl,
    SpotifyId,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_artists_table::Artists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishlistArtists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishlistArtists::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WishlistArtists::ArtistId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(WishlistArtists::UserId)
                            .col(WishlistArtists::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_artists_artist_id")
                            .from(WishlistArtists::Table, WishlistArtists::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistArtists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WishlistArtists {
    Table,
    UserId,
    ArtistId,
}

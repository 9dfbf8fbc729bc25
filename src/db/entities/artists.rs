use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Trimmed + lowercased `name`; dedup key for entity resolution.
    pub name_normalized: String,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub spotify_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lineups::Entity")]
    Lineups,
    #[sea_orm(has_many = "super::wishlist_artists::Entity")]
    WishlistArtists,
}

impl Related<super::lineups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lineups.def()
    }
}

impl Related<super::wishlist_artists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistArtists.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        super::lineups::Relation::Events.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lineups::Relation::Artists.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

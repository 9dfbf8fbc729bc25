use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub date: DateTimeWithTimeZone,
    pub venue_id: Option<Uuid>,
    pub source: String,
    pub source_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venues::Entity",
        from = "Column::VenueId",
        to = "super::venues::Column::Id"
    )]
    Venues,
    #[sea_orm(has_many = "super::lineups::Entity")]
    Lineups,
    #[sea_orm(has_many = "super::attendances::Entity")]
    Attendances,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::event_photos::Entity")]
    EventPhotos,
    #[sea_orm(has_many = "super::festival_events::Entity")]
    FestivalEvents,
}

impl Related<super::venues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venues.def()
    }
}

impl Related<super::lineups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lineups.def()
    }
}

impl Related<super::attendances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::event_photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventPhotos.def()
    }
}

impl Related<super::festival_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FestivalEvents.def()
    }
}

impl Related<super::artists::Entity> for Entity {
    fn to() -> RelationDef {
        super::lineups::Relation::Artists.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lineups::Relation::Events.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

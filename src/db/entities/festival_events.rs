use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row grouping an event under a festival, with an optional day label
/// ("Day 1", "Clashfinder Friday", ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "festival_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub festival_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: Uuid,
    pub day_label: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::festivals::Entity",
        from = "Column::FestivalId",
        to = "super::festivals::Column::Id"
    )]
    Festivals,
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Events,
}

impl Related<super::festivals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Festivals.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

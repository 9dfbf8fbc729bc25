use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "festivals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::festival_events::Entity")]
    FestivalEvents,
    #[sea_orm(has_many = "super::festival_attendances::Entity")]
    FestivalAttendances,
}

impl Related<super::festival_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FestivalEvents.def()
    }
}

impl Related<super::festival_attendances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FestivalAttendances.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        super::festival_events::Relation::Events.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::festival_events::Relation::Festivals.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Festival-scoped mirror of event attendance, with the rating/review
/// folded in (festivals carry no separate memory row).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "festival_attendances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub festival_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::festivals::Entity",
        from = "Column::FestivalId",
        to = "super::festivals::Column::Id"
    )]
    Festivals,
}

impl Related<super::festivals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Festivals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

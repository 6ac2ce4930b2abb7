use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rater_id: i32,
    pub dream_id: i32,
    /// 1-5 stars.
    pub rating: i32,
    #[sea_orm(nullable)]
    pub review: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RaterId",
        to = "super::user::Column::Id"
    )]
    Rater,
    #[sea_orm(
        belongs_to = "super::dream::Entity",
        from = "Column::DreamId",
        to = "super::dream::Column::Id"
    )]
    Dream,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rater.def()
    }
}

impl Related<super::dream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dream.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: i32,
    pub dream_id: i32,
    /// Snapshot of the dream price at transaction time. Immutable.
    pub price_paid: i32,
    pub purchase_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerId",
        to = "super::user::Column::Id"
    )]
    Buyer,
    #[sea_orm(
        belongs_to = "super::dream::Entity",
        from = "Column::DreamId",
        to = "super::dream::Column::Id"
    )]
    Dream,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl Related<super::dream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dream.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

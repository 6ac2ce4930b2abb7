use crate::storage::entity::purchase::{
    self, ActiveModel as PurchaseActiveModel, Model as PurchaseModel,
};
use crate::storage::entity::{dream, Dream, Purchase};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

pub struct PurchaseRepository;

impl PurchaseRepository {
    /// Inserts the purchase row. The unique (buyer, dream) index makes a
    /// duplicate insert fail, which settlement maps to `AlreadyPurchased`.
    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        buyer_id: i32,
        dream_id: i32,
        price_paid: i32,
    ) -> Result<PurchaseModel, sea_orm::DbErr> {
        let active_model = PurchaseActiveModel {
            buyer_id: Set(buyer_id),
            dream_id: Set(dream_id),
            price_paid: Set(price_paid),
            purchase_date: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        active_model.insert(conn).await
    }

    pub async fn exists<C: ConnectionTrait>(
        conn: &C,
        buyer_id: i32,
        dream_id: i32,
    ) -> Result<bool, sea_orm::DbErr> {
        let found = Purchase::find()
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .filter(purchase::Column::DreamId.eq(dream_id))
            .one(conn)
            .await?;
        Ok(found.is_some())
    }

    pub async fn count_by_buyer(
        db: &DatabaseConnection,
        buyer_id: i32,
    ) -> Result<u64, sea_orm::DbErr> {
        Purchase::find()
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .count(db)
            .await
    }

    /// Total points earned from sales of the author's dreams.
    pub async fn earnings_of_author(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<i64, sea_orm::DbErr> {
        let total = Purchase::find()
            .join(JoinType::InnerJoin, purchase::Relation::Dream.def())
            .filter(dream::Column::AuthorId.eq(author_id))
            .select_only()
            .column_as(purchase::Column::PricePaid.sum(), "total")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?;
        Ok(total.flatten().unwrap_or(0))
    }

    pub async fn spent_by_buyer(
        db: &DatabaseConnection,
        buyer_id: i32,
    ) -> Result<i64, sea_orm::DbErr> {
        let total = Purchase::find()
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .select_only()
            .column_as(purchase::Column::PricePaid.sum(), "total")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?;
        Ok(total.flatten().unwrap_or(0))
    }

    pub async fn by_buyer(
        db: &DatabaseConnection,
        buyer_id: i32,
    ) -> Result<Vec<PurchaseModel>, sea_orm::DbErr> {
        Purchase::find()
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .order_by_desc(purchase::Column::PurchaseDate)
            .all(db)
            .await
    }

    /// Sales of the author's dreams, most recent first.
    pub async fn sales_of_author(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<Vec<PurchaseModel>, sea_orm::DbErr> {
        Purchase::find()
            .join(JoinType::InnerJoin, purchase::Relation::Dream.def())
            .filter(dream::Column::AuthorId.eq(author_id))
            .order_by_desc(purchase::Column::PurchaseDate)
            .all(db)
            .await
    }

    /// Categories of the buyer's purchased dreams, in purchase order.
    pub async fn purchased_categories(
        db: &DatabaseConnection,
        buyer_id: i32,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        Purchase::find()
            .join(JoinType::InnerJoin, purchase::Relation::Dream.def())
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .order_by_asc(purchase::Column::PurchaseDate)
            .order_by_asc(purchase::Column::Id)
            .select_only()
            .column(dream::Column::Category)
            .into_tuple::<String>()
            .all(db)
            .await
    }

    pub async fn purchased_dreams(
        db: &DatabaseConnection,
        buyer_id: i32,
    ) -> Result<Vec<dream::Model>, sea_orm::DbErr> {
        Dream::find()
            .join(JoinType::InnerJoin, dream::Relation::Purchase.def())
            .filter(purchase::Column::BuyerId.eq(buyer_id))
            .order_by_desc(purchase::Column::PurchaseDate)
            .all(db)
            .await
    }
}

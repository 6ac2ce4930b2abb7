use crate::storage::entity::rating::{self, ActiveModel as RatingActiveModel, Model as RatingModel};
use crate::storage::entity::Rating;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

pub struct RatingRepository;

impl RatingRepository {
    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        rater_id: i32,
        dream_id: i32,
    ) -> Result<Option<RatingModel>, sea_orm::DbErr> {
        Rating::find()
            .filter(rating::Column::RaterId.eq(rater_id))
            .filter(rating::Column::DreamId.eq(dream_id))
            .one(conn)
            .await
    }

    /// Upsert keyed on the (rater, dream) unique index. A revision replaces
    /// the score and review and keeps the original timestamp.
    pub async fn upsert<C: ConnectionTrait>(
        conn: &C,
        rater_id: i32,
        dream_id: i32,
        score: i32,
        review: Option<String>,
    ) -> Result<(), sea_orm::DbErr> {
        let active_model = RatingActiveModel {
            rater_id: Set(rater_id),
            dream_id: Set(dream_id),
            rating: Set(score),
            review: Set(review),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        Rating::insert(active_model)
            .on_conflict(
                OnConflict::columns([rating::Column::RaterId, rating::Column::DreamId])
                    .update_columns([rating::Column::Rating, rating::Column::Review])
                    .to_owned(),
            )
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn scores_for_dream<C: ConnectionTrait>(
        conn: &C,
        dream_id: i32,
    ) -> Result<Vec<i32>, sea_orm::DbErr> {
        Rating::find()
            .filter(rating::Column::DreamId.eq(dream_id))
            .select_only()
            .column(rating::Column::Rating)
            .into_tuple::<i32>()
            .all(conn)
            .await
    }

    pub async fn for_dream(
        db: &DatabaseConnection,
        dream_id: i32,
    ) -> Result<Vec<RatingModel>, sea_orm::DbErr> {
        Rating::find()
            .filter(rating::Column::DreamId.eq(dream_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn count_by_rater(
        db: &DatabaseConnection,
        rater_id: i32,
    ) -> Result<u64, sea_orm::DbErr> {
        Rating::find()
            .filter(rating::Column::RaterId.eq(rater_id))
            .count(db)
            .await
    }

    pub async fn by_rater(
        db: &DatabaseConnection,
        rater_id: i32,
    ) -> Result<Vec<RatingModel>, sea_orm::DbErr> {
        Rating::find()
            .filter(rating::Column::RaterId.eq(rater_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(db)
            .await
    }
}

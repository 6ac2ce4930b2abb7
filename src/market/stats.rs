use crate::market::model::{MarketError, UserStats};
use crate::market::rating::round1;
use crate::storage::entity::dream::Model as DreamModel;
use crate::storage::repository::{DreamRepository, PurchaseRepository, RatingRepository};
use sea_orm::DatabaseConnection;

/// Profile-page numbers for one user.
pub async fn user_stats(db: &DatabaseConnection, user_id: i32) -> Result<UserStats, MarketError> {
    let dreams_posted = DreamRepository::count_authored(db, user_id).await?;
    let dreams_purchased = PurchaseRepository::count_by_buyer(db, user_id).await?;
    let total_earnings = PurchaseRepository::earnings_of_author(db, user_id).await?;
    let total_spent = PurchaseRepository::spent_by_buyer(db, user_id).await?;
    let ratings_given = RatingRepository::count_by_rater(db, user_id).await?;
    let average_rating_received = DreamRepository::rating_received(db, user_id)
        .await?
        .map(round1)
        .unwrap_or(0.0);

    Ok(UserStats {
        dreams_posted,
        dreams_purchased,
        total_earnings,
        total_spent,
        average_rating_received,
        ratings_given,
    })
}

/// Highest-rated dream of the past week, falling back to the all-time best
/// when the week was quiet.
pub async fn dream_of_the_week(
    db: &DatabaseConnection,
) -> Result<Option<DreamModel>, MarketError> {
    Ok(DreamRepository::dream_of_the_week(db).await?)
}

pub async fn trending_dreams(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<DreamModel>, MarketError> {
    Ok(DreamRepository::trending(db, limit).await?)
}

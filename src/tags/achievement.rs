use crate::market::model::MarketError;
use crate::storage::repository::{DreamRepository, PurchaseRepository, RatingRepository};
use crate::tags::catalog::AchievementTag;
use sea_orm::DatabaseConnection;

/// Minimum per-dream average for a dream to count towards Dream Master.
pub const HIGHLY_RATED_FLOOR: f64 = 3.5;

/// Checks every achievement predicate and returns the qualifying tags in
/// the fixed `AchievementTag::ALL` order. Callers that need a single tag
/// take the first; the rest are computed and discarded on purpose.
pub async fn evaluate(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<AchievementTag>, MarketError> {
    let mut earned = Vec::new();

    for tag in AchievementTag::ALL {
        if qualifies(db, user_id, tag).await? {
            earned.push(tag);
        }
    }

    Ok(earned)
}

async fn qualifies(
    db: &DatabaseConnection,
    user_id: i32,
    tag: AchievementTag,
) -> Result<bool, MarketError> {
    let metric = match tag {
        AchievementTag::DreamMaster => {
            DreamRepository::count_authored_rated_at_least(db, user_id, HIGHLY_RATED_FLOOR).await?
                as i64
        }
        AchievementTag::TopSeller => PurchaseRepository::earnings_of_author(db, user_id).await?,
        AchievementTag::DreamCollector => {
            PurchaseRepository::count_by_buyer(db, user_id).await? as i64
        }
        AchievementTag::GenerousRater => RatingRepository::count_by_rater(db, user_id).await? as i64,
        AchievementTag::VersatileDreamer => {
            DreamRepository::distinct_authored_categories(db, user_id)
                .await?
                .len() as i64
        }
    };

    Ok(metric >= tag.threshold())
}

use crate::market::model::{MarketError, RatingOutcome, Viewer};
use crate::storage::repository::{DreamRepository, PurchaseRepository, RatingRepository};
use log::info;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Recomputes a dream's aggregate pair from its full rating set. An empty
/// set yields (0.0, 0). The mean is rounded to one decimal place.
///
/// Generic over the connection so rating writes can run it inside their own
/// transaction; the cached columns on the dream row are only ever written
/// here, right after a rating write, never lazily on read.
pub async fn recompute<C: ConnectionTrait>(
    conn: &C,
    dream_id: i32,
) -> Result<(f64, i32), MarketError> {
    let scores = RatingRepository::scores_for_dream(conn, dream_id).await?;

    let (average, count) = if scores.is_empty() {
        (0.0, 0)
    } else {
        let sum: i32 = scores.iter().sum();
        (
            round1(f64::from(sum) / scores.len() as f64),
            scores.len() as i32,
        )
    };

    DreamRepository::set_aggregates(conn, dream_id, average, count).await?;
    Ok((average, count))
}

/// Accepts or revises a rating. Only buyers of the dream may rate it; a
/// second submission by the same rater replaces the stored score and review
/// instead of adding a row. Upsert, recompute and the aggregate write share
/// one transaction so the cached pair never diverges from the rating set.
pub async fn submit(
    db: &DatabaseConnection,
    viewer: &Viewer,
    dream_id: i32,
    score: i32,
    review: Option<String>,
) -> Result<RatingOutcome, MarketError> {
    let rater_id = viewer.require_user()?;

    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(MarketError::InvalidScore(score));
    }

    let txn = db.begin().await?;

    if DreamRepository::by_id(&txn, dream_id).await?.is_none() {
        return Err(MarketError::DreamNotFound(dream_id));
    }

    if !PurchaseRepository::exists(&txn, rater_id, dream_id).await? {
        return Err(MarketError::NotPurchased);
    }

    let first_rating = RatingRepository::find(&txn, rater_id, dream_id)
        .await?
        .is_none();

    RatingRepository::upsert(&txn, rater_id, dream_id, score, review).await?;
    let (average_rating, total_ratings) = recompute(&txn, dream_id).await?;

    txn.commit().await?;

    info!(
        "user {rater_id} rated dream {dream_id}: {score}/5 ({}), avg now {average_rating}",
        if first_rating { "new" } else { "revised" }
    );

    Ok(RatingOutcome {
        first_rating,
        average_rating,
        total_ratings,
    })
}

/// The score a viewer previously gave a dream, if any.
pub async fn score_given(
    db: &DatabaseConnection,
    viewer: &Viewer,
    dream_id: i32,
) -> Result<Option<i32>, MarketError> {
    let Some(rater_id) = viewer.user_id() else {
        return Ok(None);
    };
    Ok(RatingRepository::find(db, rater_id, dream_id)
        .await?
        .map(|r| r.rating))
}

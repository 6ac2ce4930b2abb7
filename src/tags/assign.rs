use crate::market::model::MarketError;
use crate::storage::repository::UserRepository;
use crate::tags::catalog::UserTag;
use crate::tags::{achievement, preference};
use log::{debug, info};
use sea_orm::DatabaseConnection;

/// Recomputes and persists one user's tag: first qualifying achievement by
/// table order, else the dominant preference category, else no tag at all.
/// A pure function of the user's dreams/purchases/ratings, so re-running it
/// on unchanged data is a no-op.
pub async fn assign_tag(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<UserTag>, MarketError> {
    if UserRepository::by_id(db, user_id).await?.is_none() {
        return Err(MarketError::UserNotFound(user_id));
    }

    let achievements = achievement::evaluate(db, user_id).await?;
    let tag = if let Some(first) = achievements.first() {
        Some(UserTag::Achievement(*first))
    } else {
        preference::analyze(db, user_id)
            .await?
            .dominant()
            .map(UserTag::Category)
    };

    UserRepository::set_tag(db, user_id, tag.map(|t| t.as_str().to_string())).await?;
    debug!("user {user_id} tag -> {:?}", tag.map(|t| t.as_str()));

    Ok(tag)
}

/// Batch sweep over every user. Each user is one independent unit of work,
/// no transaction spans the whole batch, so the sweep can run alongside
/// normal reads and is safe to re-run at any time.
pub async fn sweep_all(db: &DatabaseConnection) -> Result<u64, MarketError> {
    let ids = UserRepository::all_ids(db).await?;
    let mut updated = 0u64;

    for user_id in ids {
        match assign_tag(db, user_id).await {
            Ok(_) => updated += 1,
            // A user removed mid-sweep is not worth aborting the batch for.
            Err(MarketError::UserNotFound(_)) => {}
            Err(err) => return Err(err),
        }
    }

    info!("tag sweep updated {updated} users");
    Ok(updated)
}

use crate::market::model::{MarketError, PurchaseReceipt, Viewer};
use crate::storage::repository::{DreamRepository, PurchaseRepository, UserRepository};
use log::info;
use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

/// Settles a dream purchase: validates, moves points from buyer to seller
/// and records the purchase, all inside one transaction. Preconditions are
/// checked in a fixed order and the first failing one wins. On any error the
/// transaction is dropped and rolled back, so points never move partially.
pub async fn purchase(
    db: &DatabaseConnection,
    viewer: &Viewer,
    dream_id: i32,
) -> Result<PurchaseReceipt, MarketError> {
    let buyer_id = viewer.require_user()?;

    let txn = db.begin().await?;

    let dream = DreamRepository::by_id(&txn, dream_id)
        .await?
        .ok_or(MarketError::DreamNotFound(dream_id))?;

    if dream.author_id == buyer_id {
        return Err(MarketError::SelfPurchase);
    }

    let buyer = UserRepository::by_id(&txn, buyer_id)
        .await?
        .ok_or(MarketError::UserNotFound(buyer_id))?;

    if buyer.points < dream.price {
        return Err(MarketError::InsufficientFunds {
            deficit: dream.price - buyer.points,
        });
    }

    if PurchaseRepository::exists(&txn, buyer_id, dream_id).await? {
        return Err(MarketError::AlreadyPurchased);
    }

    let seller = UserRepository::by_id(&txn, dream.author_id)
        .await?
        .ok_or(MarketError::UserNotFound(dream.author_id))?;

    UserRepository::adjust_points(&txn, buyer_id, -dream.price).await?;
    UserRepository::adjust_points(&txn, dream.author_id, dream.price).await?;

    // price_paid snapshots the current price; later edits never touch it.
    // A concurrent purchase that slipped past the pre-check dies here on the
    // (buyer, dream) unique index and takes the whole transaction with it.
    let record = PurchaseRepository::insert(&txn, buyer_id, dream_id, dream.price)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => MarketError::AlreadyPurchased,
            _ => MarketError::Persistence(err),
        })?;

    txn.commit().await?;

    info!(
        "user {buyer_id} purchased dream {dream_id} from user {} for {} points",
        dream.author_id, dream.price
    );

    Ok(PurchaseReceipt {
        purchase_id: record.id,
        dream_id,
        buyer_id,
        seller_id: dream.author_id,
        price_paid: record.price_paid,
        buyer_balance: buyer.points - dream.price,
        seller_balance: seller.points + dream.price,
    })
}

/// Read-only version of the settlement preconditions, for "can this viewer
/// buy this dream" checks on a detail page.
pub async fn validate(
    db: &DatabaseConnection,
    viewer: &Viewer,
    dream_id: i32,
) -> Result<(), MarketError> {
    let buyer_id = viewer.require_user()?;

    let dream = DreamRepository::by_id(db, dream_id)
        .await?
        .ok_or(MarketError::DreamNotFound(dream_id))?;

    if dream.author_id == buyer_id {
        return Err(MarketError::SelfPurchase);
    }

    let buyer = UserRepository::by_id(db, buyer_id)
        .await?
        .ok_or(MarketError::UserNotFound(buyer_id))?;

    if buyer.points < dream.price {
        return Err(MarketError::InsufficientFunds {
            deficit: dream.price - buyer.points,
        });
    }

    if PurchaseRepository::exists(db, buyer_id, dream_id).await? {
        return Err(MarketError::AlreadyPurchased);
    }

    Ok(())
}

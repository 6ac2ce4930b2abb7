use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the session collaborator tells us about the caller. The core never
/// authenticates anybody, it only consumes this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viewer {
    Anonymous,
    Known(i32),
}

impl Viewer {
    pub fn user_id(&self) -> Option<i32> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Known(id) => Some(*id),
        }
    }

    pub fn require_user(&self) -> Result<i32, MarketError> {
        self.user_id().ok_or(MarketError::Unauthenticated)
    }
}

/// Every failure a marketplace operation can surface. All of these are
/// per-request and recoverable; user-facing wording is the caller's job.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("log in to do that")]
    Unauthenticated,
    #[error("you cannot purchase your own dream")]
    SelfPurchase,
    #[error("insufficient points, {deficit} more needed")]
    InsufficientFunds { deficit: i32 },
    #[error("dream already purchased")]
    AlreadyPurchased,
    #[error("only purchased dreams can be rated")]
    NotPurchased,
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidScore(i32),
    #[error("dream {0} not found")]
    DreamNotFound(i32),
    #[error("user {0} not found")]
    UserNotFound(i32),
    #[error("persistence failure: {0}")]
    Persistence(#[from] sea_orm::DbErr),
}

/// Snapshot handed back after a successful settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub purchase_id: i32,
    pub dream_id: i32,
    pub buyer_id: i32,
    pub seller_id: i32,
    pub price_paid: i32,
    pub buyer_balance: i32,
    pub seller_balance: i32,
}

/// Result of a rating submission, with the freshly recomputed aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingOutcome {
    /// False when an existing rating by the same rater was revised in place.
    pub first_rating: bool,
    pub average_rating: f64,
    pub total_ratings: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub dreams_posted: u64,
    pub dreams_purchased: u64,
    pub total_earnings: i64,
    pub total_spent: i64,
    pub average_rating_received: f64,
    pub ratings_given: u64,
}

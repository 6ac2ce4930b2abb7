pub mod model;
pub mod rating;
pub mod settlement;
pub mod stats;

pub use model::{MarketError, PurchaseReceipt, RatingOutcome, UserStats, Viewer};

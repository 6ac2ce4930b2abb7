pub mod dream_repo;
pub mod purchase_repo;
pub mod rating_repo;
pub mod user_repo;

pub use dream_repo::{DreamRepository, DreamSearch, DreamSort, NewDream, Page};
pub use purchase_repo::PurchaseRepository;
pub use rating_repo::RatingRepository;
pub use user_repo::UserRepository;

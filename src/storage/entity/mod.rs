pub mod dream;
pub mod purchase;
pub mod rating;
pub mod user;

pub use dream::Entity as Dream;
pub use purchase::Entity as Purchase;
pub use rating::Entity as Rating;
pub use user::Entity as User;

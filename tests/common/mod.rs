#![allow(dead_code)]

use dreammarket::market::rating;
use dreammarket::storage::entity::dream::Model as DreamModel;
use dreammarket::storage::entity::user::Model as UserModel;
use dreammarket::storage::repository::{
    DreamRepository, NewDream, PurchaseRepository, RatingRepository, UserRepository,
};
use dreammarket::{establish_connection, Category};
use sea_orm::DatabaseConnection;

pub const STARTING_POINTS: i32 = 1000;

pub async fn memory_db() -> DatabaseConnection {
    establish_connection("sqlite::memory:")
        .await
        .expect("in-memory database")
}

pub async fn user(db: &DatabaseConnection, name: &str) -> UserModel {
    UserRepository::create(
        db,
        name.to_string(),
        format!("{name}@example.com"),
        "hash".to_string(),
        STARTING_POINTS,
    )
    .await
    .expect("create user")
}

pub async fn user_with_points(db: &DatabaseConnection, name: &str, points: i32) -> UserModel {
    let user = user(db, name).await;
    UserRepository::adjust_points(db, user.id, points - STARTING_POINTS)
        .await
        .expect("adjust points");
    UserRepository::by_id(db, user.id)
        .await
        .expect("reload user")
        .expect("user exists")
}

pub async fn dream(
    db: &DatabaseConnection,
    author_id: i32,
    title: &str,
    category: Category,
    price: i32,
) -> DreamModel {
    DreamRepository::create(
        db,
        NewDream {
            title: title.to_string(),
            description: format!("{title} description"),
            category,
            price,
            image_filename: None,
            author_id,
        },
    )
    .await
    .expect("create dream")
}

/// Seeds a purchase row directly, bypassing settlement. For fixtures that
/// only care about the row counts (collector thresholds etc.).
pub async fn seed_purchase(db: &DatabaseConnection, buyer_id: i32, dream_id: i32, price: i32) {
    PurchaseRepository::insert(db, buyer_id, dream_id, price)
        .await
        .expect("seed purchase");
}

/// Seeds a rating row and keeps the dream aggregates in sync.
pub async fn seed_rating(db: &DatabaseConnection, rater_id: i32, dream_id: i32, score: i32) {
    RatingRepository::upsert(db, rater_id, dream_id, score, None)
        .await
        .expect("seed rating");
    rating::recompute(db, dream_id).await.expect("recompute");
}

pub async fn reload_user(db: &DatabaseConnection, user_id: i32) -> UserModel {
    UserRepository::by_id(db, user_id)
        .await
        .expect("reload user")
        .expect("user exists")
}

pub async fn reload_dream(db: &DatabaseConnection, dream_id: i32) -> DreamModel {
    DreamRepository::by_id(db, dream_id)
        .await
        .expect("reload dream")
        .expect("dream exists")
}

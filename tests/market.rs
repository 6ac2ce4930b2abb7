mod common;

use common::*;
use dreammarket::market::{rating, settlement, stats};
use dreammarket::storage::repository::{DreamRepository, DreamSearch, DreamSort};
use dreammarket::{Category, Viewer};

#[tokio::test]
async fn user_stats_track_both_sides_of_the_market() {
    let db = memory_db().await;
    let author = user(&db, "author").await;
    let buyer = user(&db, "buyer").await;
    let viewer = Viewer::Known(buyer.id);

    let d1 = dream(&db, author.id, "one", Category::Scary, 200).await;
    let d2 = dream(&db, author.id, "two", Category::Funny, 300).await;
    settlement::purchase(&db, &viewer, d1.id).await.unwrap();
    settlement::purchase(&db, &viewer, d2.id).await.unwrap();
    rating::submit(&db, &viewer, d1.id, 4, None).await.unwrap();
    rating::submit(&db, &viewer, d2.id, 5, None).await.unwrap();

    let author_stats = stats::user_stats(&db, author.id).await.unwrap();
    assert_eq!(author_stats.dreams_posted, 2);
    assert_eq!(author_stats.dreams_purchased, 0);
    assert_eq!(author_stats.total_earnings, 500);
    assert_eq!(author_stats.total_spent, 0);
    assert_eq!(author_stats.average_rating_received, 4.5);
    assert_eq!(author_stats.ratings_given, 0);

    let buyer_stats = stats::user_stats(&db, buyer.id).await.unwrap();
    assert_eq!(buyer_stats.dreams_purchased, 2);
    assert_eq!(buyer_stats.total_spent, 500);
    assert_eq!(buyer_stats.ratings_given, 2);
    assert_eq!(buyer_stats.average_rating_received, 0.0);
}

#[tokio::test]
async fn search_filters_and_sorts() {
    let db = memory_db().await;
    let author = user(&db, "author").await;

    dream(&db, author.id, "cheap scare", Category::Scary, 50).await;
    dream(&db, author.id, "pricey scare", Category::Scary, 800).await;
    dream(&db, author.id, "giggle", Category::Funny, 120).await;

    let page = DreamRepository::search(
        &db,
        DreamSearch {
            category: Some(Category::Scary),
            sort: Some(DreamSort::PriceLow),
            ..Default::default()
        },
        1,
        12,
    )
    .await
    .unwrap();

    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[0].title, "cheap scare");
    assert_eq!(page.items[1].title, "pricey scare");

    let page = DreamRepository::search(
        &db,
        DreamSearch {
            text: Some("scare".into()),
            max_price: Some(100),
            ..Default::default()
        },
        1,
        12,
    )
    .await
    .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].title, "cheap scare");
}

#[tokio::test]
async fn search_paginates() {
    let db = memory_db().await;
    let author = user(&db, "author").await;
    for i in 0..5 {
        dream(&db, author.id, &format!("d{i}"), Category::Bizarre, 10).await;
    }

    let page = DreamRepository::search(&db, DreamSearch::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn dream_of_the_week_prefers_rated_recent_dreams() {
    let db = memory_db().await;
    let author = user(&db, "author").await;
    let buyer = user(&db, "buyer").await;
    let viewer = Viewer::Known(buyer.id);

    let unrated = dream(&db, author.id, "unrated", Category::Surreal, 10).await;
    let rated = dream(&db, author.id, "rated", Category::Surreal, 10).await;
    settlement::purchase(&db, &viewer, rated.id).await.unwrap();
    rating::submit(&db, &viewer, rated.id, 5, None).await.unwrap();

    let pick = stats::dream_of_the_week(&db).await.unwrap().unwrap();
    assert_eq!(pick.id, rated.id);
    assert_ne!(pick.id, unrated.id);

    let trending = stats::trending_dreams(&db, 6).await.unwrap();
    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0].id, rated.id);
}

#[tokio::test]
async fn profile_listings_are_ordered_by_recency() {
    let db = memory_db().await;
    let author = user(&db, "author").await;
    let buyer = user(&db, "buyer").await;
    let viewer = Viewer::Known(buyer.id);

    let d1 = dream(&db, author.id, "first", Category::Scary, 100).await;
    let d2 = dream(&db, author.id, "second", Category::Funny, 100).await;
    settlement::purchase(&db, &viewer, d1.id).await.unwrap();
    settlement::purchase(&db, &viewer, d2.id).await.unwrap();
    rating::submit(&db, &viewer, d1.id, 4, Some("nice".into()))
        .await
        .unwrap();

    use dreammarket::storage::repository::{PurchaseRepository, RatingRepository, UserRepository};

    let authored = DreamRepository::authored_by(&db, author.id).await.unwrap();
    assert_eq!(authored.len(), 2);

    let bought = PurchaseRepository::purchased_dreams(&db, buyer.id)
        .await
        .unwrap();
    assert_eq!(bought.len(), 2);

    let orders = PurchaseRepository::by_buyer(&db, buyer.id).await.unwrap();
    let sales = PurchaseRepository::sales_of_author(&db, author.id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(sales.len(), 2);

    let given = RatingRepository::by_rater(&db, buyer.id).await.unwrap();
    assert_eq!(given.len(), 1);
    assert_eq!(given[0].review.as_deref(), Some("nice"));
    let received = RatingRepository::for_dream(&db, d1.id).await.unwrap();
    assert_eq!(received.len(), 1);

    UserRepository::update_bio(&db, author.id, Some("dreams for sale".into()))
        .await
        .unwrap();
    let reloaded = UserRepository::by_username(&db, "author")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.bio.as_deref(), Some("dreams for sale"));
}

#[tokio::test]
async fn deleting_a_dream_cascades() {
    let db = memory_db().await;
    let author = user(&db, "author").await;
    let buyer = user(&db, "buyer").await;
    let viewer = Viewer::Known(buyer.id);

    let listing = dream(&db, author.id, "doomed", Category::Scary, 100).await;
    settlement::purchase(&db, &viewer, listing.id).await.unwrap();
    rating::submit(&db, &viewer, listing.id, 3, None)
        .await
        .unwrap();

    DreamRepository::delete_cascading(&db, listing.id)
        .await
        .unwrap();

    use dreammarket::storage::entity::{Dream, Purchase, Rating};
    use sea_orm::{EntityTrait, PaginatorTrait};
    assert_eq!(Dream::find().count(&db).await.unwrap(), 0);
    assert_eq!(Purchase::find().count(&db).await.unwrap(), 0);
    assert_eq!(Rating::find().count(&db).await.unwrap(), 0);
}

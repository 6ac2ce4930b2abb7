mod common;

use common::*;
use dreammarket::market::{rating, settlement};
use dreammarket::storage::entity::Rating;
use dreammarket::{Category, MarketError, Viewer};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn only_buyers_may_rate() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let stranger = user(&db, "stranger").await;
    let dream = dream(&db, seller.id, "gate", Category::Scary, 100).await;

    let err = rating::submit(&db, &Viewer::Known(stranger.id), dream.id, 4, None)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::NotPurchased));
    assert_eq!(Rating::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn aggregates_follow_the_rating_set() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let dream = dream(&db, seller.id, "avg", Category::Surreal, 10).await;

    for (name, score) in [("a", 5), ("b", 4), ("c", 3)] {
        let rater = user(&db, name).await;
        let viewer = Viewer::Known(rater.id);
        settlement::purchase(&db, &viewer, dream.id).await.unwrap();
        let outcome = rating::submit(&db, &viewer, dream.id, score, None)
            .await
            .unwrap();
        assert!(outcome.first_rating);
    }

    let dream = reload_dream(&db, dream.id).await;
    assert_eq!(dream.average_rating, 4.0);
    assert_eq!(dream.total_ratings, 3);
}

#[tokio::test]
async fn mean_is_rounded_to_one_decimal() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let dream = dream(&db, seller.id, "thirds", Category::Funny, 10).await;

    // 5 + 4 + 1 = 10 over three raters: 3.333... stored as 3.3.
    for (name, score) in [("a", 5), ("b", 4), ("c", 1)] {
        let rater = user(&db, name).await;
        let viewer = Viewer::Known(rater.id);
        settlement::purchase(&db, &viewer, dream.id).await.unwrap();
        rating::submit(&db, &viewer, dream.id, score, None)
            .await
            .unwrap();
    }

    let dream = reload_dream(&db, dream.id).await;
    assert_eq!(dream.average_rating, 3.3);
}

#[tokio::test]
async fn resubmission_revises_in_place() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let buyer = user(&db, "buyer").await;
    let dream = dream(&db, seller.id, "redo", Category::Romantic, 10).await;
    let viewer = Viewer::Known(buyer.id);

    settlement::purchase(&db, &viewer, dream.id).await.unwrap();
    rating::submit(&db, &viewer, dream.id, 2, Some("meh".into()))
        .await
        .unwrap();

    let outcome = rating::submit(&db, &viewer, dream.id, 5, Some("grew on me".into()))
        .await
        .unwrap();
    assert!(!outcome.first_rating);
    assert_eq!(outcome.average_rating, 5.0);
    assert_eq!(outcome.total_ratings, 1);

    assert_eq!(Rating::find().count(&db).await.unwrap(), 1);
    assert_eq!(
        rating::score_given(&db, &viewer, dream.id).await.unwrap(),
        Some(5)
    );
}

#[tokio::test]
async fn out_of_range_scores_are_rejected() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let buyer = user(&db, "buyer").await;
    let dream = dream(&db, seller.id, "range", Category::Bizarre, 10).await;
    let viewer = Viewer::Known(buyer.id);
    settlement::purchase(&db, &viewer, dream.id).await.unwrap();

    for score in [0, 6, -1] {
        let err = rating::submit(&db, &viewer, dream.id, score, None)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidScore(s) if s == score));
    }
}

#[tokio::test]
async fn anonymous_raters_are_rejected() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let dream = dream(&db, seller.id, "anon", Category::Scary, 10).await;

    let err = rating::submit(&db, &Viewer::Anonymous, dream.id, 3, None)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Unauthenticated));
}

#[tokio::test]
async fn recompute_of_unrated_dream_yields_zero_state() {
    let db = memory_db().await;
    let seller = user(&db, "seller").await;
    let dream = dream(&db, seller.id, "quiet", Category::Funny, 10).await;

    let (average, count) = rating::recompute(&db, dream.id).await.unwrap();
    assert_eq!(average, 0.0);
    assert_eq!(count, 0);
}

use crate::market::model::MarketError;
use crate::storage::repository::{DreamRepository, PurchaseRepository};
use crate::tags::catalog::Category;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Weight of an authored dream's category versus a purchased one's.
pub const CREATION_WEIGHT: f64 = 0.7;
pub const PURCHASE_WEIGHT: f64 = 0.3;

/// Weighted category histogram. Entries keep first-encountered order, which
/// doubles as the documented tie-break for `dominant`: on equal scores the
/// category seen first wins, so the result is deterministic for a given
/// fold order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferenceProfile {
    scores: Vec<(Category, f64)>,
}

impl PreferenceProfile {
    pub fn add(&mut self, category: Category, weight: f64) {
        if let Some(entry) = self.scores.iter_mut().find(|(c, _)| *c == category) {
            entry.1 += weight;
        } else {
            self.scores.push((category, weight));
        }
    }

    /// Categories with their accumulated scores; zero-contribution
    /// categories are absent.
    pub fn scores(&self) -> &[(Category, f64)] {
        &self.scores
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn dominant(&self) -> Option<Category> {
        let mut best: Option<(Category, f64)> = None;
        for &(category, score) in &self.scores {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((category, score)),
            }
        }
        best.map(|(category, _)| category)
    }
}

/// Folds the user's authored dreams (creation order), then purchases
/// (purchase order), into a weighted profile. Rows with a category string
/// outside the fixed set are skipped.
pub async fn analyze(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<PreferenceProfile, MarketError> {
    let mut profile = PreferenceProfile::default();

    for raw in DreamRepository::authored_categories(db, user_id).await? {
        if let Some(category) = Category::parse(&raw) {
            profile.add(category, CREATION_WEIGHT);
        }
    }
    for raw in PurchaseRepository::purchased_categories(db, user_id).await? {
        if let Some(category) = Category::parse(&raw) {
            profile.add(category, PURCHASE_WEIGHT);
        }
    }

    Ok(profile)
}

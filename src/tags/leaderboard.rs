use crate::market::model::MarketError;
use crate::storage::entity::user::Model as UserModel;
use crate::storage::repository::UserRepository;
use crate::tags::catalog::{TagInfo, UserTag};
use futures::future::try_join_all;
use log::warn;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Example members shown per tag.
const MEMBERS_SHOWN: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub tag: UserTag,
    pub info: &'static TagInfo,
    pub member_count: u64,
    /// Up to five example members carrying the tag.
    pub members: Vec<UserModel>,
}

/// Groups users by assigned tag and ranks tags by member count, largest
/// first. Equal counts land in unspecified order; this board is cosmetic.
/// Tag strings outside the closed set are skipped, as the original data may
/// predate a catalog change.
pub async fn build(db: &DatabaseConnection) -> Result<Vec<LeaderboardEntry>, MarketError> {
    let counts = UserRepository::tag_counts(db).await?;

    let mut tagged: Vec<(UserTag, u64)> = Vec::with_capacity(counts.len());
    for (raw, member_count) in counts {
        match UserTag::parse(&raw) {
            Some(tag) => tagged.push((tag, member_count)),
            None => warn!("skipping unknown tag {raw:?} on leaderboard"),
        }
    }

    let member_lists = try_join_all(
        tagged
            .iter()
            .map(|(tag, _)| UserRepository::by_tag(db, tag.as_str(), Some(MEMBERS_SHOWN))),
    )
    .await?;

    let mut entries: Vec<LeaderboardEntry> = tagged
        .into_iter()
        .zip(member_lists)
        .map(|((tag, member_count), members)| LeaderboardEntry {
            tag,
            info: tag.info(),
            member_count,
            members,
        })
        .collect();

    entries.sort_by(|a, b| b.member_count.cmp(&a.member_count));
    Ok(entries)
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static display metadata attached to every tag in the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// The fixed dream category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Surreal,
    Funny,
    Scary,
    Romantic,
    Bizarre,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Surreal,
        Category::Funny,
        Category::Scary,
        Category::Romantic,
        Category::Bizarre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Surreal => "surreal",
            Category::Funny => "funny",
            Category::Scary => "scary",
            Category::Romantic => "romantic",
            Category::Bizarre => "bizarre",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn info(&self) -> &'static TagInfo {
        match self {
            Category::Scary => &TagInfo {
                name: "Nightmare Weaver",
                icon: "👹",
                description: "Master of spine-chilling dreams and dark fantasies",
                color: "#8B0000",
            },
            Category::Romantic => &TagInfo {
                name: "Love Dreamer",
                icon: "💕",
                description: "Creator of romantic visions and heart-warming tales",
                color: "#FF69B4",
            },
            Category::Surreal => &TagInfo {
                name: "Reality Bender",
                icon: "🌀",
                description: "Artist of impossible worlds and mind-bending experiences",
                color: "#9932CC",
            },
            Category::Funny => &TagInfo {
                name: "Dream Comedian",
                icon: "😂",
                description: "Bringer of laughter and whimsical adventures",
                color: "#FFD700",
            },
            Category::Bizarre => &TagInfo {
                name: "Chaos Architect",
                icon: "🎭",
                description: "Creator of strange and wonderfully weird experiences",
                color: "#FF4500",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement tags, declared in priority order: when several qualify, the
/// first of `ALL` wins. Priority is this table order, never magnitude or
/// how recently a threshold was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTag {
    DreamMaster,
    TopSeller,
    DreamCollector,
    GenerousRater,
    VersatileDreamer,
}

impl AchievementTag {
    pub const ALL: [AchievementTag; 5] = [
        AchievementTag::DreamMaster,
        AchievementTag::TopSeller,
        AchievementTag::DreamCollector,
        AchievementTag::GenerousRater,
        AchievementTag::VersatileDreamer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementTag::DreamMaster => "dream_master",
            AchievementTag::TopSeller => "top_seller",
            AchievementTag::DreamCollector => "dream_collector",
            AchievementTag::GenerousRater => "generous_rater",
            AchievementTag::VersatileDreamer => "versatile_dreamer",
        }
    }

    pub fn parse(s: &str) -> Option<AchievementTag> {
        AchievementTag::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn threshold(&self) -> i64 {
        match self {
            AchievementTag::DreamMaster => 20,
            AchievementTag::TopSeller => 10_000,
            AchievementTag::DreamCollector => 50,
            AchievementTag::GenerousRater => 100,
            AchievementTag::VersatileDreamer => Category::ALL.len() as i64,
        }
    }

    pub fn info(&self) -> &'static TagInfo {
        match self {
            AchievementTag::DreamMaster => &TagInfo {
                name: "Dream Master",
                icon: "👑",
                description: "Created 20+ highly-rated dreams",
                color: "#FFD700",
            },
            AchievementTag::TopSeller => &TagInfo {
                name: "Dream Merchant",
                icon: "💰",
                description: "Earned 10,000+ points from dream sales",
                color: "#32CD32",
            },
            AchievementTag::DreamCollector => &TagInfo {
                name: "Dream Collector",
                icon: "🛍️",
                description: "Purchased 50+ dreams",
                color: "#4169E1",
            },
            AchievementTag::GenerousRater => &TagInfo {
                name: "Dream Critic",
                icon: "⭐",
                description: "Rated 100+ dreams",
                color: "#FF6347",
            },
            AchievementTag::VersatileDreamer => &TagInfo {
                name: "Versatile Visionary",
                icon: "🎨",
                description: "Created dreams in all categories",
                color: "#9370DB",
            },
        }
    }
}

impl fmt::Display for AchievementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's assigned tag. Achievement and category tags are one closed set
/// with a single lookup; "no tag" is `Option::None` at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTag {
    Achievement(AchievementTag),
    Category(Category),
}

impl UserTag {
    /// Parses the persisted string form. Achievement names shadow nothing in
    /// the category set, so the order here is cosmetic.
    pub fn parse(s: &str) -> Option<UserTag> {
        if let Some(tag) = AchievementTag::parse(s) {
            return Some(UserTag::Achievement(tag));
        }
        Category::parse(s).map(UserTag::Category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserTag::Achievement(tag) => tag.as_str(),
            UserTag::Category(category) => category.as_str(),
        }
    }

    pub fn info(&self) -> &'static TagInfo {
        match self {
            UserTag::Achievement(tag) => tag.info(),
            UserTag::Category(category) => category.info(),
        }
    }

    pub fn is_achievement(&self) -> bool {
        matches!(self, UserTag::Achievement(_))
    }
}

impl fmt::Display for UserTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

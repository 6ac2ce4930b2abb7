use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dreammarket.db?mode=rwc";
pub const DEFAULT_STARTING_POINTS: i32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// Points balance a freshly created user starts with.
    pub starting_points: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            starting_points: DEFAULT_STARTING_POINTS,
        }
    }
}

impl Config {
    /// Reads `DATABASE_URL` and `STARTING_POINTS` from the environment,
    /// `.env` included; anything missing or unparseable falls back to the
    /// defaults.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let starting_points = std::env::var("STARTING_POINTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_STARTING_POINTS);

        Self {
            database_url,
            starting_points,
        }
    }
}

pub mod nba;

use async_trait::async_trait;

use crate::core::{GameLine, PlayerProfile, PlayerRecord, SeasonLine};
use crate::error::Result;

pub use nba::NbaStatsProvider;

/// Trait for upstream player-statistics sources
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch the full list of known players (called once, at roster load)
    async fn all_players(&self) -> Result<Vec<PlayerRecord>>;

    /// Fetch biographical info for one player
    async fn player_info(&self, player_id: i64) -> Result<PlayerProfile>;

    /// Fetch per-season regular-season averages, oldest first
    async fn career_stats(&self, player_id: i64) -> Result<Vec<SeasonLine>>;

    /// Fetch up to `count` most recent games, newest first
    async fn recent_games(&self, player_id: i64, count: usize) -> Result<Vec<GameLine>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

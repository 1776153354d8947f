use std::sync::Arc;
use std::time::Instant;

use crate::core::{ComparedPlayer, Comparison, PlayerPage, PlayerRecord};
use crate::error::{LookupError, Result};
use crate::providers::StatsProvider;
use crate::roster::Roster;
use crate::search::{self, SUGGESTION_LIMIT};

/// Number of recent games fetched per player for the comparison view
pub const COMPARE_GAMES: usize = 5;

/// Orchestrates roster search against the upstream statistics provider.
///
/// The roster snapshot is loaded once at construction and shared read-only;
/// every lookup is a pure read over it plus on-demand provider calls.
pub struct LookupEngine {
    roster: Arc<Roster>,
    provider: Arc<dyn StatsProvider>,
}

impl LookupEngine {
    /// Create an engine, loading the roster from the provider.
    ///
    /// A failed roster load is returned as an error; the caller decides
    /// whether that is fatal (the server treats it as fatal to startup).
    pub async fn new(provider: Arc<dyn StatsProvider>) -> Result<Self> {
        let roster = Roster::load(provider.as_ref()).await?;
        Ok(Self { roster, provider })
    }

    /// Create an engine around an existing snapshot (tests, pre-warmed hosts)
    pub fn with_roster(roster: Arc<Roster>, provider: Arc<dyn StatsProvider>) -> Self {
        Self { roster, provider }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Ranked autocomplete suggestions: prefix matches first, roster order
    /// within each rank class, at most [`SUGGESTION_LIMIT`] entries.
    /// An empty query yields an empty list, never an error.
    pub fn autocomplete(&self, query: &str) -> Vec<PlayerRecord> {
        let matched = search::match_players(query, self.roster.players());
        search::rank(matched, query, SUGGESTION_LIMIT)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Direct-search path: first roster-order substring match, then the full
    /// player page from the provider.
    ///
    /// This deliberately takes the first match rather than the ranked top
    /// suggestion; which player's stats load on direct search depends on it.
    pub async fn player_page(&self, query: &str) -> Result<PlayerPage> {
        let start = Instant::now();

        let player = search::find_first(query, self.roster.players())
            .ok_or_else(|| LookupError::PlayerNotFound(query.trim().to_string()))?;

        let profile = self.provider.player_info(player.id).await?;
        let seasons = self.provider.career_stats(player.id).await?;

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            "Player lookup '{}' → {} ({} seasons, {:.1}ms)",
            query,
            profile.full_name,
            seasons.len(),
            latency_ms
        );

        Ok(PlayerPage {
            profile,
            seasons,
            latency_ms,
        })
    }

    /// Compare two players' last [`COMPARE_GAMES`] games side by side.
    /// Either name failing to match is a distinct not-found error naming the
    /// offending query.
    pub async fn compare(&self, first_query: &str, second_query: &str) -> Result<Comparison> {
        let start = Instant::now();

        let first = search::find_first(first_query, self.roster.players())
            .ok_or_else(|| LookupError::PlayerNotFound(first_query.trim().to_string()))?
            .clone();
        let second = search::find_first(second_query, self.roster.players())
            .ok_or_else(|| LookupError::PlayerNotFound(second_query.trim().to_string()))?
            .clone();

        let first_games = self.provider.recent_games(first.id, COMPARE_GAMES).await?;
        let second_games = self.provider.recent_games(second.id, COMPARE_GAMES).await?;

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            "Compared {} vs {} ({:.1}ms)",
            first.full_name,
            second.full_name,
            latency_ms
        );

        Ok(Comparison {
            first: ComparedPlayer {
                player: first,
                games: first_games,
            },
            second: ComparedPlayer {
                player: second,
                games: second_games,
            },
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::{GameLine, PlayerProfile, SeasonLine};

    struct EmptyProvider;

    #[async_trait]
    impl StatsProvider for EmptyProvider {
        async fn all_players(&self) -> Result<Vec<PlayerRecord>> {
            Ok(Vec::new())
        }

        async fn player_info(&self, player_id: i64) -> Result<PlayerProfile> {
            Ok(PlayerProfile::new(player_id, "Test"))
        }

        async fn career_stats(&self, _player_id: i64) -> Result<Vec<SeasonLine>> {
            Ok(Vec::new())
        }

        async fn recent_games(&self, _player_id: i64, _count: usize) -> Result<Vec<GameLine>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    #[tokio::test]
    async fn test_engine_loads_roster_on_creation() {
        let engine = LookupEngine::new(Arc::new(EmptyProvider)).await.unwrap();
        assert!(engine.roster().is_empty());
    }

    #[tokio::test]
    async fn test_autocomplete_on_empty_roster() {
        let engine = LookupEngine::new(Arc::new(EmptyProvider)).await.unwrap();
        assert!(engine.autocomplete("curry").is_empty());
        assert!(engine.autocomplete("").is_empty());
    }

    #[tokio::test]
    async fn test_player_page_not_found_carries_query() {
        let roster = Arc::new(Roster::new(vec![PlayerRecord::new(1, "Stephen Curry")]));
        let engine = LookupEngine::with_roster(roster, Arc::new(EmptyProvider));

        let err = engine.player_page("  jokic ").await.unwrap_err();
        match err {
            LookupError::PlayerNotFound(q) => assert_eq!(q, "jokic"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

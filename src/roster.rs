use std::sync::Arc;

use crate::core::PlayerRecord;
use crate::error::Result;
use crate::providers::StatsProvider;

/// Immutable snapshot of every known player.
///
/// Loaded once from the upstream provider at process start and read-only for
/// the rest of the process lifetime; concurrent readers share it through an
/// `Arc` without locking. A roster that changes upstream mid-process is an
/// accepted staleness limitation.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

impl Roster {
    /// Build a snapshot from an already-fetched player list (used by tests
    /// and by callers that manage their own fetch)
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    /// Fetch the full player list from the provider once.
    ///
    /// Load is idempotent and side-effect-free beyond producing the snapshot,
    /// so multi-worker hosts may call it per worker or share one `Arc`.
    pub async fn load(provider: &dyn StatsProvider) -> Result<Arc<Self>> {
        let players = provider.all_players().await?;
        tracing::info!(
            "Loaded roster: {} players from '{}'",
            players.len(),
            provider.name()
        );
        Ok(Arc::new(Self::new(players)))
    }

    /// All players, in upstream order
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

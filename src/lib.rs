//! # Courtside
//!
//! NBA player statistics lookup backend with:
//! - Roster search: case-insensitive substring matching over an immutable
//!   in-memory snapshot loaded once at startup
//! - Ranked autocomplete (prefix matches first, stable within rank, top 5)
//! - Player pages with per-season chart series from the official stats feed
//! - Two-player recent-game comparison
//! - Session-gated HTTP API, SQLite user store, rule-based FAQ chatbot
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use courtside::{LookupEngine, NbaStatsProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = LookupEngine::new(Arc::new(NbaStatsProvider::new())).await?;
//!
//!     for suggestion in engine.autocomplete("ste") {
//!         println!("{} ({})", suggestion.full_name, suggestion.id);
//!     }
//!
//!     let page = engine.player_page("curry").await?;
//!     println!("{} — {} seasons", page.profile.full_name, page.seasons.len());
//!     Ok(())
//! }
//! ```

pub mod chatbot;
pub mod core;
pub mod engine;
pub mod error;
pub mod providers;
pub mod roster;
pub mod search;
pub mod session;
pub mod users;

// Re-export primary types
pub use crate::core::{
    ComparedPlayer, Comparison, GameLine, PlayerPage, PlayerProfile, PlayerRecord, SeasonLine,
};
pub use engine::LookupEngine;
pub use error::{LookupError, Result};
pub use providers::{NbaStatsProvider, StatsProvider};
pub use roster::Roster;
pub use search::SUGGESTION_LIMIT;
pub use session::SessionRegistry;
pub use users::{SqliteUserStore, UserStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

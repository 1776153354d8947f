//! Roster search: substring matching and autocomplete ranking.
//!
//! Both entry points are pure functions over the immutable roster snapshot.
//! They never mutate their inputs and never fail: malformed or empty queries
//! degrade to empty results.

pub mod matcher;
pub mod ranker;

pub use matcher::{find_first, match_players};
pub use ranker::rank;

/// Maximum number of autocomplete suggestions returned to the client
pub const SUGGESTION_LIMIT: usize = 5;

/// Normalize a query for matching: trim surrounding whitespace, lowercase
pub(crate) fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

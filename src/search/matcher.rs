use crate::core::PlayerRecord;
use crate::search::normalize_query;

/// Filter the roster to players whose name contains the query.
///
/// The query is a literal substring (no wildcards, no tokenization) compared
/// case-insensitively. Roster order is preserved in the result. A query that
/// is empty after trimming short-circuits to an empty result rather than
/// matching everything.
pub fn match_players<'a>(query: &str, roster: &'a [PlayerRecord]) -> Vec<&'a PlayerRecord> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }

    roster
        .iter()
        .filter(|p| p.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// First roster-order player whose name contains the query, or None.
///
/// This is the direct-search path: it deliberately ignores prefix ranking and
/// takes the first substring match in roster order, unlike autocomplete.
/// Callers surface None as a distinct "no such player" outcome.
pub fn find_first<'a>(query: &str, roster: &'a [PlayerRecord]) -> Option<&'a PlayerRecord> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return None;
    }

    roster
        .iter()
        .find(|p| p.full_name.to_lowercase().contains(&needle))
}

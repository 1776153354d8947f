use crate::core::PlayerRecord;
use crate::search::normalize_query;

/// Order substring matches for the autocomplete dropdown.
///
/// Two rank classes only: names that start with the query come first, interior
/// substring matches second. The sort is stable, so roster order is preserved
/// within each class; no secondary key is applied. The result is truncated to
/// `limit` entries.
///
/// Precondition: `matches` already satisfies the substring predicate against
/// `query` (the output of [`match_players`](crate::search::match_players)).
/// The ranker trusts this and does not re-verify; records that don't contain
/// the query at all are simply classified as non-prefix matches.
pub fn rank<'a>(
    matches: Vec<&'a PlayerRecord>,
    query: &str,
    limit: usize,
) -> Vec<&'a PlayerRecord> {
    let needle = normalize_query(query);

    let mut ranked = matches;
    // sort_by_key is stable: ties keep their input order
    ranked.sort_by_key(|p| usize::from(!p.full_name.to_lowercase().starts_with(&needle)));
    ranked.truncate(limit);
    ranked
}

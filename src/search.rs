//! Case-insensitive substring search over the deck index.

use crate::models::DeckSummary;

/// Filter index entries by a substring query.
///
/// The query is trimmed and lower-cased; an empty query returns the input
/// unfiltered. Otherwise an entry is kept when its `name` or `description`
/// contains the query, unanchored and case-insensitive. Input order is
/// preserved either way.
pub fn filter_index(entries: Vec<DeckSummary>, query: &str) -> Vec<DeckSummary> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&term)
                || d.description.to_lowercase().contains(&term)
        })
        .collect()
}

//! Result composition
//!
//! Merges favorited items (always shown, unfiltered, in index order) with the
//! query-filtered remainder. The output is a pure function of
//! (items, query, favorites); stale favorite ids simply never appear.

use std::collections::HashSet;

use crate::highlight::{highlight, HighlightStyle};
use crate::search::SearchIndex;

/// One row of the composed dropdown list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedEntry {
    pub id: String,
    /// Display string; carries highlight markup only for fuzzy-matched rows.
    pub display: String,
    pub is_favorite: bool,
}

/// Compose the dropdown rows: favorites first (items order, plain display),
/// then the ranked matches for `query` with favorites excluded. An empty
/// query yields the full sorted item list instead of matcher output.
///
/// Favorites bypass the fuzzy filter entirely so pinned items never
/// disappear as the user types.
pub fn compose(
    index: &mut SearchIndex,
    query: &str,
    favorites: &HashSet<String>,
    min_score: u32,
    style: &HighlightStyle,
) -> Vec<ComposedEntry> {
    let mut rows: Vec<ComposedEntry> = index
        .items()
        .iter()
        .filter(|item| favorites.contains(&item.id))
        .map(|item| ComposedEntry {
            id: item.id.clone(),
            display: item.display.clone(),
            is_favorite: true,
        })
        .collect();

    if query.is_empty() {
        rows.extend(
            index
                .items()
                .iter()
                .filter(|item| !favorites.contains(&item.id))
                .map(|item| ComposedEntry {
                    id: item.id.clone(),
                    display: item.display.clone(),
                    is_favorite: false,
                }),
        );
    } else {
        for m in index.search(query, min_score) {
            if favorites.contains(&m.id) {
                continue;
            }
            rows.push(ComposedEntry {
                display: highlight(&m.id, &m.indices, style),
                id: m.id,
                is_favorite: false,
            });
        }
    }

    rows
}

//! Fuzzy matching over the model-id index
//!
//! Uses nucleo for high-performance matching and scoring. The internal search
//! structure is rebuilt only when the item list changes; keystrokes re-run the
//! pattern against the existing index.

use std::cmp::Ordering;

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};

use crate::index::SearchableItem;

/// Find the position of needle in haystack using ASCII case-insensitive
/// matching. `needle_lower` must already be lowercase. No allocation,
/// O(n*m) worst case.
#[inline]
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle_lower: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle_lower.as_bytes();
    if n.is_empty() {
        return Some(0);
    }
    if n.len() > h.len() {
        return None;
    }
    'outer: for i in 0..=(h.len() - n.len()) {
        for j in 0..n.len() {
            if h[i + j].to_ascii_lowercase() != n[j] {
                continue 'outer;
            }
        }
        return Some(i);
    }
    None
}

/// A scored match with the character positions that matched, used solely for
/// highlighting. Indices are char positions in the display string, sorted and
/// deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemMatch {
    pub id: String,
    pub score: u32,
    pub indices: Vec<u32>,
}

/// Fuzzy-search index over the current item list.
///
/// Holds pre-converted UTF-32 haystacks and a reusable matcher so per-query
/// work stays allocation-light. `rebuild` must be called whenever the
/// underlying item list changes, never per keystroke.
pub struct SearchIndex {
    items: Vec<SearchableItem>,
    haystacks: Vec<Utf32String>,
    matcher: Matcher,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        SearchIndex {
            items: Vec::new(),
            haystacks: Vec::new(),
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Replace the indexed items, rebuilding the UTF-32 haystacks.
    pub fn rebuild(&mut self, items: Vec<SearchableItem>) {
        self.haystacks = items
            .iter()
            .map(|item| Utf32String::from(item.display.as_str()))
            .collect();
        self.items = items;
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run the query against the index and return ranked matches.
    ///
    /// Case-insensitive and typo-tolerant via nucleo; an exact substring hit
    /// earns a bonus (larger at the start of the id) so near-prefix results
    /// rank first. Matches scoring below `min_score` before the bonus are
    /// dropped. Empty queries return no matches; the empty-query branch is
    /// handled upstream by the composer.
    pub fn search(&mut self, query: &str, min_score: u32) -> Vec<ItemMatch> {
        if query.is_empty() {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut indices: Vec<u32> = Vec::new();
        let mut matches = Vec::new();

        for (item, haystack) in self.items.iter().zip(self.haystacks.iter()) {
            indices.clear();
            let raw = match pattern.indices(haystack.slice(..), &mut self.matcher, &mut indices) {
                Some(score) => u32::from(score),
                None => continue,
            };
            if raw < min_score {
                continue;
            }
            indices.sort_unstable();
            indices.dedup();

            // Scale the raw score down and layer substring bonuses on top
            let mut score = 50 + raw / 20;
            if let Some(pos) = find_ignore_ascii_case(&item.display, &query_lower) {
                score += if pos == 0 { 100 } else { 75 };
            }

            matches.push(ItemMatch {
                id: item.id.clone(),
                score,
                indices: indices.clone(),
            });
        }

        // Sort by score (highest first), then by id for ties
        matches.sort_by(|a, b| match b.score.cmp(&a.score) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });

        matches
    }
}

/// Case-insensitive exact-id check backing the "has model info" decision.
/// Degrades to `false` for empty queries or unknown ids rather than erroring.
pub fn has_exact_match(items: &[SearchableItem], query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    let query_lower = query.to_lowercase();
    items.iter().any(|item| item.id.to_lowercase() == query_lower)
}

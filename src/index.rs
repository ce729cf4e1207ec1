//! Identifier index building
//!
//! Normalizes the raw model-id list into a deterministically sorted list of
//! searchable items. Rebuilt whenever the upstream id set or the exclusion
//! predicate changes; pure, no side effects.

/// A single searchable entry. `display` starts equal to `id` and is replaced
/// by a highlighted variant downstream; `id` never changes once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchableItem {
    pub id: String,
    pub display: String,
}

impl SearchableItem {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        SearchableItem {
            display: id.clone(),
            id,
        }
    }
}

/// Predicate deciding which ids a provider wants excluded from the index.
pub type ExcludeFn = dyn Fn(&str) -> bool;

/// Build the searchable item list: filter, sort (case-sensitive
/// lexicographic), and drop duplicate ids.
pub fn build_items(ids: &[String], exclude: Option<&ExcludeFn>) -> Vec<SearchableItem> {
    let mut items: Vec<SearchableItem> = ids
        .iter()
        .filter(|id| !exclude.map_or(false, |f| f(id.as_str())))
        .map(|id| SearchableItem::new(id.clone()))
        .collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items.dedup_by(|a, b| a.id == b.id);
    items
}

/// Exclusion used by the curated provider: free-tier variants are hidden.
pub fn is_free_tier(id: &str) -> bool {
    id.contains(":free")
}

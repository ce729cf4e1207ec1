//! Picker orchestrator
//!
//! Wires the index, matcher, composer, and navigation reducer to the external
//! collaborators: a model catalog, a favorite store, and a delegate that
//! receives committed selections and query changes. All state transitions run
//! synchronously on discrete events; there is no internal concurrency.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info};

use crate::compose::{compose, ComposedEntry};
use crate::config::PickerConfig;
use crate::debounce::DirtyFlag;
use crate::error::{PickerError, ResultExt};
use crate::index::{build_items, ExcludeFn};
use crate::navigation::{NavEffect, NavEvent, NavState};
use crate::search::{has_exact_match, SearchIndex};

/// Source of the current model-id list. `refresh` is a hint to re-fetch; the
/// picker re-reads `model_ids` afterwards.
pub trait ModelCatalog {
    fn model_ids(&self) -> Vec<String>;
    fn refresh(&self) {}
}

/// Externally owned favorite set. Toggles are forwarded fire-and-forget; the
/// picker never mutates membership locally and re-reads it on every compose.
pub trait FavoriteStore {
    fn favorite_ids(&self) -> HashSet<String>;
    fn toggle_favorite(&self, id: &str) -> anyhow::Result<()>;
}

/// Consumer callbacks.
pub trait PickerDelegate {
    fn selection_committed(&self, id: &str);
    /// Fires on every query change; consumers use it to decide whether to
    /// show supplementary model info for an exact id match.
    fn query_changed(&self, _query: &str) {}
}

/// Curated shortlist surfaced above the search field for the managed
/// provider. Picking one commits it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeaturedModel {
    pub id: &'static str,
    pub description: &'static str,
    pub label: &'static str,
}

pub const FEATURED_MODELS: &[FeaturedModel] = &[
    FeaturedModel {
        id: "anthropic/claude-sonnet-4",
        description: "Recommended for agentic coding",
        label: "Best",
    },
    FeaturedModel {
        id: "moonshotai/kimi-k2",
        description: "Latest open source model, trained for agentic tool calling",
        label: "Trending",
    },
    FeaturedModel {
        id: "x-ai/grok-4",
        description: "Latest flagship model from xAI",
        label: "Fast & Cheap",
    },
];

/// The interactive fuzzy-search selector.
///
/// Composed rows are recomputed on every query change, favorite change, or
/// identifier-set change; the fuzzy index itself is rebuilt only when the
/// identifier set (or exclusion predicate) changes.
pub struct ModelPicker<C: ModelCatalog, F: FavoriteStore> {
    catalog: C,
    favorites: F,
    delegate: Rc<dyn PickerDelegate>,
    config: PickerConfig,
    exclude: Option<Box<ExcludeFn>>,
    index: SearchIndex,
    nav: NavState,
    dirty: DirtyFlag,
    rows: Vec<ComposedEntry>,
}

impl<C: ModelCatalog, F: FavoriteStore> ModelPicker<C, F> {
    pub fn new(
        catalog: C,
        favorites: F,
        delegate: Rc<dyn PickerDelegate>,
        config: PickerConfig,
    ) -> Self {
        let dirty = DirtyFlag::new(config.dirty_timeout());
        ModelPicker {
            catalog,
            favorites,
            delegate,
            config,
            exclude: None,
            index: SearchIndex::new(),
            nav: NavState::default(),
            dirty,
            rows: Vec::new(),
        }
    }

    /// Called once when the picker becomes active: asks the catalog to
    /// refresh, then indexes whatever it currently has.
    pub fn activate(&mut self) {
        self.catalog.refresh();
        self.reload_items();
    }

    /// Re-read the catalog and rebuild the fuzzy index. Call whenever the
    /// upstream identifier set may have changed.
    pub fn reload_items(&mut self) {
        let ids = self.catalog.model_ids();
        let items = build_items(&ids, self.exclude.as_deref());
        debug!(
            event_type = "index",
            total = ids.len(),
            indexed = items.len(),
            "Rebuilt model index"
        );
        self.index.rebuild(items);
        self.recompose();
    }

    /// Install or clear a provider-specific exclusion predicate and re-index.
    pub fn set_exclusion(&mut self, exclude: Option<Box<ExcludeFn>>) {
        self.exclude = exclude;
        self.reload_items();
    }

    /// Handle a keystroke in the search field. The submitted query is always
    /// lower-cased; typing marks the dirty flag and opens the dropdown.
    pub fn set_query(&mut self, raw: &str, now: Instant) -> Option<NavEffect> {
        let query = raw.to_lowercase();
        self.dirty.note_edit(now);
        self.nav.apply(NavEvent::Open, self.rows.len());
        let effect = self.nav.apply(NavEvent::QueryChanged(query), self.rows.len());
        self.recompose();
        self.delegate.query_changed(&self.nav.query);
        effect
    }

    /// Externally driven "query follows the configured selection" sync.
    /// Suppressed while the user is still typing; returns whether it applied.
    pub fn sync_selected_model(&mut self, id: &str, now: Instant) -> bool {
        if self.dirty.is_dirty(now) {
            debug!(event_type = "sync", id = id, "External sync suppressed while typing");
            return false;
        }
        if self.nav.query == id {
            return true;
        }
        self.nav
            .apply(NavEvent::QueryChanged(id.to_string()), self.rows.len());
        self.recompose();
        self.delegate.query_changed(id);
        true
    }

    /// Apply a navigation event (keyboard or mouse) against the current
    /// composed list. Typed input should go through [`set_query`] instead so
    /// the dirty flag is maintained.
    ///
    /// [`set_query`]: ModelPicker::set_query
    pub fn handle_event(&mut self, event: NavEvent) -> Option<NavEffect> {
        let is_query_change = matches!(event, NavEvent::QueryChanged(_));
        let effect = self.nav.apply(event, self.rows.len());
        if is_query_change {
            self.recompose();
            self.delegate.query_changed(&self.nav.query);
        }
        if let Some(NavEffect::Commit(ix)) = effect {
            if let Some(row) = self.rows.get(ix) {
                let id = row.id.clone();
                self.commit_id(&id);
            }
        }
        effect
    }

    /// Commit one of the curated featured models directly.
    pub fn pick_featured(&mut self, id: &str) {
        self.commit_id(id);
    }

    /// Forward a favorite toggle to the store. Failures are logged and the
    /// flow continues; membership display is re-read from the store either
    /// way, so there is no optimistic state to roll back.
    pub fn toggle_favorite(&mut self, id: &str) {
        self.favorites
            .toggle_favorite(id)
            .map_err(|source| PickerError::FavoriteToggle {
                id: id.to_string(),
                source,
            })
            .log_err();
        self.recompose();
    }

    /// The composed dropdown rows: favorites first, then ranked matches.
    pub fn rows(&self) -> &[ComposedEntry] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.nav.query
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open
    }

    pub fn cursor(&self) -> Option<usize> {
        self.nav.cursor
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// Whether the current query exactly names a known model id
    /// (case-insensitive). Consumers gate supplementary info on this.
    pub fn has_model_info(&self) -> bool {
        has_exact_match(self.index.items(), &self.nav.query)
    }

    fn commit_id(&mut self, id: &str) {
        info!(event_type = "selection", id = id, "Model selection committed");
        self.delegate.selection_committed(id);
        self.nav.is_open = false;
        self.nav
            .apply(NavEvent::QueryChanged(id.to_string()), self.rows.len());
        self.recompose();
        self.delegate.query_changed(id);
    }

    fn recompose(&mut self) {
        let favorites = self.favorites.favorite_ids();
        self.rows = compose(
            &mut self.index,
            &self.nav.query,
            &favorites,
            self.config.min_score,
            &self.config.highlight,
        );
        // Favorite or item-set changes can shrink the list without a query
        // change; keep the cursor invariant intact.
        if self.nav.cursor.map_or(false, |c| c >= self.rows.len()) {
            self.nav.cursor = None;
        }
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;

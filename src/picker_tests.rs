use super::*;

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::index::is_free_tier;

#[derive(Default)]
struct FakeCatalog {
    ids: RefCell<Vec<String>>,
    refreshes: Cell<usize>,
}

impl FakeCatalog {
    fn with_ids(raw: &[&str]) -> Rc<Self> {
        Rc::new(FakeCatalog {
            ids: RefCell::new(raw.iter().map(|s| s.to_string()).collect()),
            refreshes: Cell::new(0),
        })
    }
}

impl ModelCatalog for Rc<FakeCatalog> {
    fn model_ids(&self) -> Vec<String> {
        self.ids.borrow().clone()
    }

    fn refresh(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

#[derive(Default)]
struct FakeFavorites {
    ids: RefCell<HashSet<String>>,
    fail: Cell<bool>,
    toggles: RefCell<Vec<String>>,
}

impl FavoriteStore for Rc<FakeFavorites> {
    fn favorite_ids(&self) -> HashSet<String> {
        self.ids.borrow().clone()
    }

    fn toggle_favorite(&self, id: &str) -> anyhow::Result<()> {
        self.toggles.borrow_mut().push(id.to_string());
        if self.fail.get() {
            anyhow::bail!("favorite rpc unavailable");
        }
        let mut ids = self.ids.borrow_mut();
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    committed: RefCell<Vec<String>>,
    queries: RefCell<Vec<String>>,
}

impl PickerDelegate for Recorder {
    fn selection_committed(&self, id: &str) {
        self.committed.borrow_mut().push(id.to_string());
    }

    fn query_changed(&self, query: &str) {
        self.queries.borrow_mut().push(query.to_string());
    }
}

type TestPicker = ModelPicker<Rc<FakeCatalog>, Rc<FakeFavorites>>;

fn picker_with(
    raw: &[&str],
) -> (TestPicker, Rc<FakeCatalog>, Rc<FakeFavorites>, Rc<Recorder>) {
    let catalog = FakeCatalog::with_ids(raw);
    let favorites = Rc::new(FakeFavorites::default());
    let delegate = Rc::new(Recorder::default());
    let mut picker = ModelPicker::new(
        Rc::clone(&catalog),
        Rc::clone(&favorites),
        delegate.clone(),
        PickerConfig::default(),
    );
    picker.activate();
    (picker, catalog, favorites, delegate)
}

fn row_ids(picker: &TestPicker) -> Vec<String> {
    picker.rows().iter().map(|r| r.id.clone()).collect()
}

const MODELS: &[&str] = &[
    "openai/gpt-4",
    "anthropic/claude-sonnet-4",
    "anthropic/claude-opus-4",
];

#[test]
fn activate_refreshes_catalog_and_indexes_sorted() {
    let (picker, catalog, _favorites, _delegate) = picker_with(MODELS);
    assert_eq!(catalog.refreshes.get(), 1);
    assert_eq!(
        row_ids(&picker),
        vec![
            "anthropic/claude-opus-4",
            "anthropic/claude-sonnet-4",
            "openai/gpt-4"
        ]
    );
}

#[test]
fn typing_lowercases_filters_and_opens() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(MODELS);
    picker.set_query("CLAUDE", Instant::now());

    assert_eq!(picker.query(), "claude");
    assert!(picker.is_open());
    assert_eq!(picker.cursor(), None);
    let ids = row_ids(&picker);
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.contains("claude")));
    assert!(picker.rows().iter().all(|r| r.display.contains("<mark>")));
    assert_eq!(delegate.queries.borrow().last().unwrap(), "claude");
}

#[test]
fn favorites_stay_pinned_while_typing() {
    let (mut picker, _catalog, favorites, _delegate) = picker_with(MODELS);
    favorites.ids.borrow_mut().insert("openai/gpt-4".to_string());
    picker.set_query("claude", Instant::now());

    let ids = row_ids(&picker);
    assert_eq!(ids[0], "openai/gpt-4");
    assert!(picker.rows()[0].is_favorite);
    assert!(!picker.rows()[0].display.contains("<mark>"));
    assert_eq!(ids.len(), 3);
}

#[test]
fn enter_commits_highlighted_row() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(MODELS);
    picker.set_query("claude", Instant::now());
    picker.handle_event(NavEvent::ArrowDown);
    let expected = picker.rows()[0].id.clone();

    let effect = picker.handle_event(NavEvent::Enter);
    assert_eq!(effect, Some(NavEffect::Commit(0)));
    assert_eq!(delegate.committed.borrow().as_slice(), &[expected.clone()]);
    assert!(!picker.is_open());
    // Committed id becomes the query, so exact-match info is available
    assert_eq!(picker.query(), expected);
    assert!(picker.has_model_info());
}

#[test]
fn click_commits_that_row() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(MODELS);
    picker.set_query("claude", Instant::now());
    let expected = picker.rows()[1].id.clone();

    picker.handle_event(NavEvent::Click(1));
    assert_eq!(delegate.committed.borrow().as_slice(), &[expected]);
    assert!(!picker.is_open());
}

#[test]
fn enter_with_no_highlight_commits_nothing() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(MODELS);
    picker.set_query("claude", Instant::now());
    assert_eq!(picker.handle_event(NavEvent::Enter), None);
    assert!(delegate.committed.borrow().is_empty());
}

#[test]
fn toggle_favorite_failure_is_logged_not_surfaced() {
    let (mut picker, _catalog, favorites, delegate) = picker_with(MODELS);
    favorites.fail.set(true);
    let before = row_ids(&picker);

    picker.toggle_favorite("openai/gpt-4");

    assert_eq!(favorites.toggles.borrow().len(), 1);
    assert_eq!(row_ids(&picker), before);
    assert!(delegate.committed.borrow().is_empty());
}

#[test]
fn toggle_favorite_success_floats_it_to_the_top() {
    let (mut picker, _catalog, _favorites, _delegate) = picker_with(MODELS);
    picker.toggle_favorite("openai/gpt-4");

    let ids = row_ids(&picker);
    assert_eq!(ids[0], "openai/gpt-4");
    assert!(picker.rows()[0].is_favorite);

    // A second toggle unpins it again
    picker.toggle_favorite("openai/gpt-4");
    assert!(!picker.rows().iter().any(|r| r.is_favorite));
}

#[test]
fn external_sync_suppressed_while_typing_then_applies() {
    let (mut picker, _catalog, _favorites, _delegate) = picker_with(MODELS);
    let t0 = Instant::now();
    picker.set_query("clau", t0);

    // Mid-typing sync must not clobber the query
    assert!(!picker.sync_selected_model("openai/gpt-4", t0 + Duration::from_millis(500)));
    assert_eq!(picker.query(), "clau");

    // A later keystroke restarts the window
    picker.set_query("claud", t0 + Duration::from_millis(800));
    assert!(!picker.sync_selected_model("openai/gpt-4", t0 + Duration::from_millis(1700)));

    // After the settle timeout the sync wins
    assert!(picker.sync_selected_model("openai/gpt-4", t0 + Duration::from_millis(1900)));
    assert_eq!(picker.query(), "openai/gpt-4");
}

#[test]
fn external_sync_resets_cursor() {
    let (mut picker, _catalog, _favorites, _delegate) = picker_with(MODELS);
    picker.handle_event(NavEvent::Open);
    picker.handle_event(NavEvent::ArrowDown);
    assert_eq!(picker.cursor(), Some(0));

    assert!(picker.sync_selected_model("openai/gpt-4", Instant::now()));
    assert_eq!(picker.cursor(), None);
}

#[test]
fn exclusion_predicate_hides_free_tier_variants() {
    let (mut picker, _catalog, _favorites, _delegate) =
        picker_with(&["a/one", "a/one:free", "b/two:free"]);
    assert_eq!(row_ids(&picker).len(), 3);

    picker.set_exclusion(Some(Box::new(is_free_tier)));
    assert_eq!(row_ids(&picker), vec!["a/one"]);

    picker.set_exclusion(None);
    assert_eq!(row_ids(&picker).len(), 3);
}

#[test]
fn reload_picks_up_catalog_changes() {
    let (mut picker, catalog, _favorites, _delegate) = picker_with(&["a/one"]);
    catalog.ids.borrow_mut().push("b/two".to_string());
    picker.reload_items();
    assert_eq!(row_ids(&picker), vec!["a/one", "b/two"]);
}

#[test]
fn reload_resets_cursor_when_list_shrinks() {
    let (mut picker, catalog, _favorites, _delegate) = picker_with(MODELS);
    picker.handle_event(NavEvent::Open);
    picker.handle_event(NavEvent::ArrowDown);
    picker.handle_event(NavEvent::ArrowDown);
    picker.handle_event(NavEvent::ArrowDown);
    assert_eq!(picker.cursor(), Some(2));

    *catalog.ids.borrow_mut() = vec!["a/one".to_string()];
    picker.reload_items();
    assert_eq!(picker.cursor(), None);
}

#[test]
fn empty_catalog_degrades_gracefully() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(&[]);
    assert!(picker.rows().is_empty());
    assert!(!picker.has_model_info());

    picker.handle_event(NavEvent::Open);
    picker.handle_event(NavEvent::ArrowDown);
    assert_eq!(picker.cursor(), None);
    assert_eq!(picker.handle_event(NavEvent::Enter), None);
    assert!(delegate.committed.borrow().is_empty());
}

#[test]
fn stale_favorite_never_shows_and_never_errors() {
    let (mut picker, _catalog, favorites, _delegate) = picker_with(&["a/one"]);
    favorites.ids.borrow_mut().insert("gone/model".to_string());
    picker.reload_items();
    assert_eq!(row_ids(&picker), vec!["a/one"]);
}

#[test]
fn has_model_info_requires_exact_id() {
    let (mut picker, _catalog, _favorites, _delegate) = picker_with(MODELS);
    picker.set_query("OPENAI/GPT-4", Instant::now());
    assert!(picker.has_model_info());

    picker.set_query("openai/gpt", Instant::now());
    assert!(!picker.has_model_info());
}

#[test]
fn pick_featured_commits_directly() {
    let (mut picker, _catalog, _favorites, delegate) = picker_with(MODELS);
    let featured = FEATURED_MODELS[0];
    picker.pick_featured(featured.id);

    assert_eq!(delegate.committed.borrow().as_slice(), &[featured.id.to_string()]);
    assert!(!picker.is_open());
    assert_eq!(picker.query(), featured.id);
}

#[test]
fn featured_shortlist_is_stable() {
    assert_eq!(FEATURED_MODELS.len(), 3);
    assert!(FEATURED_MODELS.iter().all(|m| !m.id.is_empty()));
}

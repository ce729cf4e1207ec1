//! model-picker - fuzzy-search selector core for model identifiers
//!
//! Given a set of model ids (e.g. `"vendor/model-name"`), this crate lets a
//! consumer filter them by typed text, pin favorites that always float to the
//! top, navigate results by keyboard, and commit a selection. Rendering,
//! favorite persistence, and theming live with external collaborators.

pub mod compose;
pub mod config;
pub mod debounce;
pub mod error;
pub mod highlight;
pub mod index;
pub mod logging;
pub mod navigation;
pub mod picker;
pub mod search;

pub use compose::ComposedEntry;
pub use config::PickerConfig;
pub use navigation::{NavEffect, NavEvent, NavState};
pub use picker::{FavoriteStore, ModelCatalog, ModelPicker, PickerDelegate};

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PickerError, Result, ResultExt};
use crate::highlight::HighlightStyle;

/// Default minimum raw fuzzy score; 0 keeps every match the matcher accepts.
pub const DEFAULT_MIN_SCORE: u32 = 0;

/// How long after the last keystroke external query sync stays suppressed.
pub const DEFAULT_DIRTY_TIMEOUT_MS: u64 = 1000;

/// Tunables for the picker core.
///
/// All fields default individually so partial config files work; a missing
/// or malformed file falls back to `PickerConfig::default()` with a warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerConfig {
    /// Minimum raw match score below which fuzzy results are dropped
    #[serde(default = "default_min_score", rename = "minScore")]
    pub min_score: u32,
    /// Milliseconds after the last keystroke before external sync resumes
    #[serde(default = "default_dirty_timeout_ms", rename = "dirtyTimeoutMs")]
    pub dirty_timeout_ms: u64,
    /// Delimiters wrapped around matched ranges in display strings
    #[serde(default)]
    pub highlight: HighlightStyle,
}

fn default_min_score() -> u32 {
    DEFAULT_MIN_SCORE
}
fn default_dirty_timeout_ms() -> u64 {
    DEFAULT_DIRTY_TIMEOUT_MS
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            min_score: DEFAULT_MIN_SCORE,
            dirty_timeout_ms: DEFAULT_DIRTY_TIMEOUT_MS,
            highlight: HighlightStyle::default(),
        }
    }
}

impl PickerConfig {
    /// Returns the dirty timeout as a `Duration`.
    pub fn dirty_timeout(&self) -> Duration {
        Duration::from_millis(self.dirty_timeout_ms)
    }

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> PickerConfig {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path. A missing file is normal and uses
    /// defaults silently; read/parse failures are logged, never fatal.
    pub fn load_from(path: &Path) -> PickerConfig {
        if !path.exists() {
            return PickerConfig::default();
        }
        match Self::read(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded picker config");
                config
            }
            err => err.warn_on_err().unwrap_or_default(),
        }
    }

    fn read(path: &Path) -> Result<PickerConfig> {
        let raw = std::fs::read_to_string(path).map_err(|source| PickerError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Path to the config file (`<config dir>/model-picker/config.json`).
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("model-picker").join("config.json"))
        .unwrap_or_else(|| std::env::temp_dir().join("model-picker-config.json"))
}

//! Match-span highlighting
//!
//! Turns matched character positions into a marked-up display string.
//! Adjacent and overlapping positions collapse into single ranges so
//! delimiters are never nested or duplicated.

use serde::{Deserialize, Serialize};

/// Delimiters wrapped around each matched range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightStyle {
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    "<mark>".to_string()
}
fn default_close() -> String {
    "</mark>".to_string()
}

impl Default for HighlightStyle {
    fn default() -> Self {
        HighlightStyle {
            open: default_open(),
            close: default_close(),
        }
    }
}

/// Collapse sorted, deduplicated char positions into half-open `[start, end)`
/// ranges, merging adjacent positions.
pub(crate) fn merge_ranges(indices: &[u32]) -> Vec<(u32, u32)> {
    let mut ranges: Vec<(u32, u32)> = Vec::new();
    for &i in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == i => *end = i + 1,
            Some((_, end)) if *end > i => {}
            _ => ranges.push((i, i + 1)),
        }
    }
    ranges
}

/// Wrap each matched range of `text` in the style's delimiters, leaving
/// unmatched characters untouched. Positions are char indices as produced by
/// the matcher; positions past the end of the string are ignored.
pub fn highlight(text: &str, indices: &[u32], style: &HighlightStyle) -> String {
    if indices.is_empty() {
        return text.to_string();
    }

    let ranges = merge_ranges(indices);
    let mut out = String::with_capacity(
        text.len() + ranges.len() * (style.open.len() + style.close.len()),
    );
    let mut pending = ranges.iter().copied().peekable();
    let mut open_until: Option<u32> = None;

    for (pos, ch) in text.chars().enumerate() {
        let pos = pos as u32;
        if open_until.is_none() {
            if let Some(&(start, end)) = pending.peek() {
                if pos == start {
                    out.push_str(&style.open);
                    open_until = Some(end);
                    pending.next();
                }
            }
        }
        out.push(ch);
        if open_until == Some(pos + 1) {
            out.push_str(&style.close);
            open_until = None;
        }
    }
    // Range ran past the end of the string; close it rather than dangle
    if open_until.is_some() {
        out.push_str(&style.close);
    }
    out
}

//! Dropdown navigation state machine
//!
//! A pure reducer over `(state, event)` independent of any UI toolkit. The
//! embedding layer maps DOM/toolkit callbacks onto `NavEvent`s and interprets
//! the returned `NavEffect`s.

/// Navigation state for the dropdown.
///
/// `cursor == None` means no row is highlighted. Invariant: when `Some(c)`,
/// `c < len` of the composed list the events were applied against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub query: String,
    pub is_open: bool,
    pub cursor: Option<usize>,
}

/// Discrete external events driving the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// The query text changed (already lower-cased by the caller for typed
    /// input).
    QueryChanged(String),
    /// Focus or typing opened the dropdown.
    Open,
    /// Blur outside the dropdown.
    Close,
    Escape,
    ArrowDown,
    ArrowUp,
    Enter,
    /// Mouse moved over the given row.
    Hover(usize),
    /// Mouse clicked the given row.
    Click(usize),
}

/// Side effects the caller must carry out after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEffect {
    /// Reset the dropdown scroll position to the top.
    ScrollToTop,
    /// Commit the row at this index of the composed list.
    Commit(usize),
}

impl NavState {
    /// Apply one event against a composed list of `list_len` rows.
    ///
    /// Keyboard events are ignored entirely while the dropdown is closed.
    pub fn apply(&mut self, event: NavEvent, list_len: usize) -> Option<NavEffect> {
        match event {
            NavEvent::QueryChanged(query) => {
                self.query = query;
                self.cursor = None;
                Some(NavEffect::ScrollToTop)
            }
            NavEvent::Open => {
                self.is_open = true;
                None
            }
            NavEvent::Close => {
                self.is_open = false;
                None
            }
            NavEvent::Escape => {
                if self.is_open {
                    self.is_open = false;
                    self.cursor = None;
                }
                None
            }
            NavEvent::ArrowDown => {
                if self.is_open && list_len > 0 {
                    self.cursor = Some(match self.cursor {
                        None => 0,
                        Some(c) => (c + 1).min(list_len - 1),
                    });
                }
                None
            }
            NavEvent::ArrowUp => {
                if self.is_open {
                    // From "no row" stays at "no row"
                    self.cursor = self.cursor.map(|c| c.saturating_sub(1));
                }
                None
            }
            NavEvent::Enter => match self.cursor {
                Some(c) if self.is_open && c < list_len => {
                    self.is_open = false;
                    Some(NavEffect::Commit(c))
                }
                _ => None,
            },
            NavEvent::Hover(ix) => {
                if self.is_open && ix < list_len {
                    self.cursor = Some(ix);
                }
                None
            }
            NavEvent::Click(ix) => {
                if self.is_open && ix < list_len {
                    self.is_open = false;
                    Some(NavEffect::Commit(ix))
                } else {
                    None
                }
            }
        }
    }
}

//! "User is typing" settle guard
//!
//! Externally driven "sync the query to the configured selection" updates
//! must not override in-progress typing. Every keystroke marks the flag dirty
//! and restarts the same timeout (last write wins); once the timeout elapses
//! with no further edits the flag clears and external sync resumes.
//!
//! Time is passed in explicitly so the guard stays a pure two-field state
//! machine that tests can drive without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct DirtyFlag {
    settle: Duration,
    last_edit: Option<Instant>,
}

impl DirtyFlag {
    pub fn new(settle: Duration) -> Self {
        DirtyFlag {
            settle,
            last_edit: None,
        }
    }

    /// Record a keystroke at `now`, restarting the settle timer.
    pub fn note_edit(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    /// Whether local edits are still unacknowledged at `now`. Clears itself
    /// once the settle timeout has elapsed.
    pub fn is_dirty(&mut self, now: Instant) -> bool {
        match self.last_edit {
            Some(at) if now.duration_since(at) < self.settle => true,
            Some(_) => {
                self.last_edit = None;
                false
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.last_edit = None;
    }
}

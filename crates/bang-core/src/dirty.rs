//! Unsaved-changes tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the table differs from what was last persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirtyState {
    /// The table reflects the persisted mapping
    #[default]
    Clean,
    /// The table has edits that are not saved yet
    Dirty,
}

impl fmt::Display for DirtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyState::Clean => write!(f, "saved"),
            DirtyState::Dirty => write!(f, "unsaved changes"),
        }
    }
}

/// Two-state tracker driving the save-button highlight
///
/// Transitions return `true` only when the state actually changed, so the
/// surface is told about each change exactly once.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    state: DirtyState,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DirtyState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == DirtyState::Dirty
    }

    pub fn mark_dirty(&mut self) -> bool {
        self.transition(DirtyState::Dirty)
    }

    pub fn mark_clean(&mut self) -> bool {
        self.transition(DirtyState::Clean)
    }

    fn transition(&mut self, next: DirtyState) -> bool {
        let changed = self.state != next;
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clean() {
        assert_eq!(DirtyTracker::new().state(), DirtyState::Clean);
    }

    #[test]
    fn test_transitions_report_changes() {
        let mut tracker = DirtyTracker::new();

        assert!(tracker.mark_dirty());
        assert!(!tracker.mark_dirty());
        assert!(tracker.is_dirty());

        assert!(tracker.mark_clean());
        assert!(!tracker.mark_clean());
        assert!(!tracker.is_dirty());
    }
}

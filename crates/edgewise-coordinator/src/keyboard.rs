//! Keyboard state derived from raw platform signals.

use edgewise_geometry::{InsetEdges, KeyboardState};

/// Tracks the one active keyboard per window.
///
/// The tracker reduces raw keyboard inset reports to a [`KeyboardState`]
/// that edge resolution consumes for `SOFT_INPUT` policies. A keyboard is
/// considered showing while it contributes a non-zero bottom inset; the
/// most recently observed report always wins.
#[derive(Debug, Default)]
pub(crate) struct KeyboardTracker {
    state: KeyboardState,
}

impl KeyboardTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Folds a raw keyboard inset report into the tracked state.
    /// Returns true if the state changed.
    pub(crate) fn observe(&mut self, keyboard: InsetEdges) -> bool {
        let next = KeyboardState {
            insets: keyboard,
            showing: keyboard.bottom > 0.0,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub(crate) fn state(&self) -> KeyboardState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_follows_bottom_inset() {
        let mut tracker = KeyboardTracker::new();
        assert!(!tracker.state().showing);

        assert!(tracker.observe(InsetEdges::new(0.0, 0.0, 0.0, 300.0)));
        assert!(tracker.state().showing);
        assert_eq!(tracker.state().insets.bottom, 300.0);

        assert!(tracker.observe(InsetEdges::ZERO));
        assert!(!tracker.state().showing);
    }

    #[test]
    fn repeated_reports_are_not_changes() {
        let mut tracker = KeyboardTracker::new();
        let keyboard = InsetEdges::new(0.0, 0.0, 0.0, 300.0);
        assert!(tracker.observe(keyboard));
        assert!(!tracker.observe(keyboard));
    }
}

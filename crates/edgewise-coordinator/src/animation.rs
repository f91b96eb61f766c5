//! Keyboard animation gating.
//!
//! Recomputing and re-padding on every intermediate animation frame causes
//! layout thrashing, so the coordinator coalesces: while a keyboard
//! transition is in flight, inset-apply requests are captured (latest node
//! only, last writer wins) and replayed exactly once after the transition
//! settles.

use bitflags::bitflags;

use crate::registry::NodeHandle;

bitflags! {
    /// Which inset sources an animation lifecycle signal covers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeMask: u8 {
        const SYSTEM_BARS    = 0b001;
        const DISPLAY_CUTOUT = 0b010;
        const SOFT_INPUT     = 0b100;
    }
}

/// Phase of the keyboard show/hide transition.
///
/// The platform end signal is atomic, so no distinct settling phase is
/// needed; intermediate progress signals keep the phase at `Animating`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Preparing,
    Animating,
}

/// Explicit state machine driven by the platform's discrete lifecycle
/// events. The pending replay target is an `Option`, so cancellation is
/// just clearing it.
#[derive(Debug)]
pub(crate) struct AnimationTracker {
    phase: AnimationPhase,
    pending: Option<NodeHandle>,
}

impl AnimationTracker {
    pub(crate) fn new() -> Self {
        Self {
            phase: AnimationPhase::Idle,
            pending: None,
        }
    }

    pub(crate) fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// True while apply requests must be captured instead of processed.
    /// Platforms report target insets between prepare and start, so the
    /// gate opens at prepare, not at start.
    pub(crate) fn is_deferring(&self) -> bool {
        self.phase != AnimationPhase::Idle
    }

    pub(crate) fn prepare(&mut self) {
        self.phase = AnimationPhase::Preparing;
    }

    pub(crate) fn start(&mut self) {
        self.phase = AnimationPhase::Animating;
    }

    /// Ends the transition, handing back the node to replay (if any).
    pub(crate) fn finish(&mut self) -> Option<NodeHandle> {
        self.phase = AnimationPhase::Idle;
        self.pending.take()
    }

    /// Captures an apply request observed mid-transition. Only the most
    /// recent request survives; there is no queue of historical states.
    pub(crate) fn capture(&mut self, handle: NodeHandle) {
        if self.pending.is_some() && self.pending != Some(handle) {
            log::debug!("coalescing inset replay: {handle:?} supersedes {:?}", self.pending);
        }
        self.pending = Some(handle);
    }

    /// Drops the pending replay if it targets this node.
    pub(crate) fn cancel(&mut self, handle: NodeHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(slot: u32) -> NodeHandle {
        NodeHandle::for_tests(slot, 0)
    }

    #[test]
    fn last_captured_request_wins() {
        let mut tracker = AnimationTracker::new();
        tracker.prepare();
        tracker.start();
        assert!(tracker.is_deferring());
        tracker.capture(handle(1));
        tracker.capture(handle(2));
        assert_eq!(tracker.finish(), Some(handle(2)));
        assert_eq!(tracker.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn cancel_clears_only_matching_pending() {
        let mut tracker = AnimationTracker::new();
        tracker.start();
        tracker.capture(handle(1));
        tracker.cancel(handle(2));
        assert_eq!(tracker.finish(), Some(handle(1)));

        tracker.start();
        tracker.capture(handle(1));
        tracker.cancel(handle(1));
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn end_without_pending_goes_straight_to_idle() {
        let mut tracker = AnimationTracker::new();
        tracker.prepare();
        assert!(tracker.is_deferring());
        assert_eq!(tracker.finish(), None);
        assert!(!tracker.is_deferring());
    }
}

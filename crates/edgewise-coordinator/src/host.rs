//! Capability trait implemented by containers that participate in
//! safe-area distribution.

use edgewise_geometry::{InsetEdges, RegionPolicy};

/// A visual container the coordinator can pad.
///
/// The coordinator queries the declared policy through this trait instead
/// of inspecting concrete container types, and pushes resolved padding back
/// through [`InsetHost::apply_padding`]. Lifecycle hooks mirror node
/// attach/detach: `on_register` fires once when the container joins the
/// registry, `on_unregister` when it leaves, and `on_reset` when applied
/// safe areas must be reverted.
pub trait InsetHost {
    /// The container's declared per-edge safe-area treatment.
    fn region_policy(&self) -> RegionPolicy;

    /// The padding currently applied to the container. Read exactly once,
    /// at registration, to capture the pre-coordinator value.
    fn current_padding(&self) -> InsetEdges;

    /// Applies resolved padding. The container is expected to request a
    /// re-layout pass from its layout engine in response.
    fn apply_padding(&mut self, padding: InsetEdges);

    /// Scrollable viewports are transparent to insets: they never claim an
    /// edge on behalf of their descendants.
    fn is_scroll_viewport(&self) -> bool {
        false
    }

    fn on_register(&mut self) {}

    fn on_unregister(&mut self) {}

    /// Reverts any applied safe areas. The default restores the padding
    /// captured at registration; containers with custom inset handling
    /// (margin-based drawers and the like) override this.
    fn on_reset(&mut self, original_padding: InsetEdges) {
        self.apply_padding(original_padding);
    }
}

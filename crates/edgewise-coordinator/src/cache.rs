//! Per-node cache of resolved insets.

use edgewise_geometry::InsetEdges;

/// Cached resolved insets plus a dirty flag.
///
/// The cached value is derived purely from the node's policy, the latest
/// raw insets, and the keyboard state; it is never hand-mutated. Anything
/// that can change the derivation (raw inset change, keyboard change,
/// policy change, re-parenting) invalidates the cache, and the next read
/// recomputes lazily.
#[derive(Debug)]
pub(crate) struct InsetCache {
    value: InsetEdges,
    dirty: bool,
}

impl InsetCache {
    /// A new cache starts dirty so the first read resolves.
    pub(crate) fn new() -> Self {
        Self {
            value: InsetEdges::ZERO,
            dirty: true,
        }
    }

    pub(crate) fn value(&self) -> InsetEdges {
        self.value
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store(&mut self, value: InsetEdges) {
        self.value = value;
        self.dirty = false;
    }
}

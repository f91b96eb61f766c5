//! The window-owned inset coordinator.
//!
//! One coordinator instance lives on the window/root container and is
//! passed by reference to child operations; there is no ambient global
//! state. All operations run on the UI thread - the only asynchrony is
//! event ordering, and the most recently observed raw inset/keyboard
//! state always wins.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use edgewise_geometry::{resolve_edge, Edge, InsetEdges};

use crate::animation::{AnimationPhase, AnimationTracker, TypeMask};
use crate::host::InsetHost;
use crate::keyboard::KeyboardTracker;
use crate::registry::{NodeHandle, NodeRegistry};
use crate::resolver::has_claiming_ancestor;

/// A raw inset report from the platform windowing layer.
///
/// Pushed whenever any value changes. Missing sources are simply zero;
/// they are never an error.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RawInsetEvent {
    pub system_bars: InsetEdges,
    pub display_cutout: InsetEdges,
    pub keyboard: InsetEdges,
}

impl RawInsetEvent {
    /// Clamps components that bypassed the `InsetEdges` constructors.
    fn sanitized(self) -> Self {
        Self {
            system_bars: InsetEdges::new(
                self.system_bars.left,
                self.system_bars.top,
                self.system_bars.right,
                self.system_bars.bottom,
            ),
            display_cutout: InsetEdges::new(
                self.display_cutout.left,
                self.display_cutout.top,
                self.display_cutout.right,
                self.display_cutout.bottom,
            ),
            keyboard: InsetEdges::new(
                self.keyboard.left,
                self.keyboard.top,
                self.keyboard.right,
                self.keyboard.bottom,
            ),
        }
    }

    /// Static chrome per edge: bars unioned with cutouts. The keyboard is
    /// kept separate and only participates through `SOFT_INPUT` policies.
    fn base_chrome(self) -> InsetEdges {
        self.system_bars.union(self.display_cutout)
    }
}

/// Distributes raw screen intrusions across a tree of registered
/// containers so that each intrusion is compensated by exactly one
/// container, chosen by declared per-edge policy.
///
/// No error crosses this boundary: degenerate inputs (missing insets,
/// stale handles, malformed hierarchies) all resolve to a safe default,
/// because a layout coordinator must never abort a frame.
pub struct InsetCoordinator {
    registry: NodeRegistry,
    raw: RawInsetEvent,
    keyboard: KeyboardTracker,
    animation: AnimationTracker,
    /// Settle-time replay queued by the animation end signal, executed by
    /// [`InsetCoordinator::flush_deferred`] after the current layout pass.
    deferred: Option<NodeHandle>,
}

impl InsetCoordinator {
    pub fn new() -> Self {
        Self {
            registry: NodeRegistry::new(),
            raw: RawInsetEvent::default(),
            keyboard: KeyboardTracker::new(),
            animation: AnimationTracker::new(),
            deferred: None,
        }
    }

    /// Registers a container under an optional parent and resolves its
    /// initial padding.
    ///
    /// No-op (returning the existing handle) if the container is already
    /// registered. The container's pre-coordinator padding is captured
    /// exactly once, here.
    pub fn register(
        &mut self,
        host: &Rc<RefCell<dyn InsetHost>>,
        parent: Option<NodeHandle>,
    ) -> NodeHandle {
        self.flush_deferred();
        self.prune_dead();
        let parent = parent.filter(|p| self.registry.contains(*p));
        let handle = self.registry.register(host, parent);
        self.request_apply(handle);
        handle
    }

    /// Unregisters a container, restoring the padding captured at
    /// registration through its `on_reset` hook.
    ///
    /// Cancels any pending deferred recomputation targeting the node.
    /// Stale handles are expected control flow and degrade to a no-op.
    pub fn unregister(&mut self, handle: NodeHandle) {
        self.animation.cancel(handle);
        if self.deferred == Some(handle) {
            self.deferred = None;
        }
        let Some(entry) = self.registry.remove(handle) else {
            log::debug!("unregister for unknown node {handle:?}; ignoring");
            return;
        };
        if let Some(host) = entry.host.upgrade() {
            let mut host = host.borrow_mut();
            host.on_reset(entry.original_padding);
            host.on_unregister();
        }
        self.prune_dead();
    }

    /// Detach handling: resets `root` (unregistering it) and every
    /// currently-registered descendant, then re-resolves the survivors.
    ///
    /// Descendants may have resolved an edge to zero because `root`
    /// claimed it; with `root` gone they must re-resolve against the next
    /// surviving ancestor.
    pub fn reset_subtree(&mut self, root: NodeHandle) {
        self.flush_deferred();
        if !self.registry.contains(root) {
            log::debug!("reset_subtree for unknown node {root:?}; ignoring");
            return;
        }

        // Collected before removal: unregistering splices the parent
        // links past `root`.
        let descendants: SmallVec<[NodeHandle; 8]> = self
            .registry
            .live_handles()
            .into_iter()
            .filter(|h| *h != root && self.registry.is_descendant_of(*h, root))
            .collect();

        self.unregister(root);

        for handle in &descendants {
            let Some((original, host)) = self
                .registry
                .get(*handle)
                .and_then(|e| e.host.upgrade().map(|h| (e.original_padding, h)))
            else {
                continue;
            };
            host.borrow_mut().on_reset(original);
            if let Some(entry) = self.registry.get_mut(*handle) {
                entry.cache.invalidate();
            }
        }
        for handle in &descendants {
            self.request_apply(*handle);
        }
    }

    /// Moves a node under a new parent. Ancestor-chain ownership may have
    /// changed, so the node and its registered subtree re-resolve.
    pub fn reparent(&mut self, handle: NodeHandle, new_parent: Option<NodeHandle>) {
        self.flush_deferred();
        if !self.registry.contains(handle) {
            log::debug!("reparent for unknown node {handle:?}; ignoring");
            return;
        }
        let new_parent = new_parent.filter(|p| self.registry.contains(*p) && *p != handle);
        if let Some(entry) = self.registry.get_mut(handle) {
            entry.parent = new_parent;
        }
        self.invalidate_subtree(handle);
        self.request_apply_subtree(handle);
    }

    /// Notifies the coordinator that a container's declared policy
    /// changed. Dirties the node and its registered subtree, since the
    /// descendants' ownership resolution depends on this node's claims.
    pub fn policy_changed(&mut self, handle: NodeHandle) {
        self.flush_deferred();
        if !self.registry.contains(handle) {
            log::debug!("policy change for unknown node {handle:?}; ignoring");
            return;
        }
        self.invalidate_subtree(handle);
        self.request_apply_subtree(handle);
    }

    /// Ingests a raw inset report targeting `target` (the container the
    /// platform attached its inset listener to).
    ///
    /// Raw state is window-global, so every registered node is dirtied;
    /// while a keyboard transition is in flight the apply is captured for
    /// settle-time replay instead of being processed.
    pub fn raw_insets_changed(&mut self, target: NodeHandle, event: RawInsetEvent) {
        self.flush_deferred();
        self.prune_dead();
        self.raw = event.sanitized();
        self.keyboard.observe(self.raw.keyboard);
        self.registry.mark_all_dirty();
        if self.animation.is_deferring() {
            log::debug!("keyboard transition in flight; deferring inset apply for {target:?}");
            self.animation.capture(target);
        } else {
            self.apply_all_dirty();
        }
    }

    /// Animation lifecycle: the platform is about to run an inset
    /// transition. Only keyboard transitions gate the coordinator.
    pub fn animation_prepare(&mut self, mask: TypeMask) {
        if !mask.contains(TypeMask::SOFT_INPUT) {
            return;
        }
        self.flush_deferred();
        self.animation.prepare();
    }

    /// Animation lifecycle: the transition started.
    pub fn animation_start(&mut self, mask: TypeMask) {
        if !mask.contains(TypeMask::SOFT_INPUT) {
            return;
        }
        self.animation.start();
    }

    /// Animation lifecycle: an intermediate frame. The phase persists and
    /// the latest keyboard values are recorded without recomputing;
    /// re-padding every frame would thrash layout.
    pub fn animation_progress(&mut self, keyboard: InsetEdges) {
        if self.animation.is_deferring() {
            self.keyboard.observe(keyboard);
        }
    }

    /// Animation lifecycle: the transition settled. If an apply request
    /// was captured mid-flight, exactly one recomputation pass is queued;
    /// the embedder drains it with [`InsetCoordinator::flush_deferred`]
    /// after the current layout pass (re-entrant layout during animation
    /// teardown is never triggered from here).
    pub fn animation_end(&mut self, mask: TypeMask) {
        if !mask.contains(TypeMask::SOFT_INPUT) {
            return;
        }
        if let Some(pending) = self.animation.finish() {
            if self.registry.contains(pending) {
                self.deferred = Some(pending);
            }
        }
    }

    /// Runs the settle-time replay queued by the animation end signal.
    /// Every synchronous entry point also drains it, so state never goes
    /// stale even if the embedder forgets to call this.
    pub fn flush_deferred(&mut self) {
        if let Some(target) = self.deferred.take() {
            log::debug!("replaying deferred inset apply for {target:?}");
            self.apply_subtree(target);
        }
    }

    /// The resolved insets for a node: cached when clean, recomputed
    /// lazily otherwise. During a keyboard transition the stale cache is
    /// returned and the node becomes the pending replay target.
    ///
    /// Unknown or stale handles resolve to zero.
    pub fn resolved_insets(&mut self, handle: NodeHandle) -> InsetEdges {
        let (dirty, cached) = match self.registry.get(handle) {
            Some(entry) => (entry.cache.is_dirty(), entry.cache.value()),
            None => return InsetEdges::ZERO,
        };
        if !dirty {
            return cached;
        }
        if self.animation.is_deferring() {
            self.animation.capture(handle);
            return cached;
        }
        self.recompute(handle).unwrap_or(InsetEdges::ZERO)
    }

    pub fn phase(&self) -> AnimationPhase {
        self.animation.phase()
    }

    /// Sweeps registry entries whose container has been dropped.
    ///
    /// Runs implicitly on registry mutation; embedders with long idle
    /// phases and heavy attach/detach churn can also call it directly to
    /// bound memory growth.
    pub fn cleanup(&mut self) {
        self.prune_dead();
    }

    /// Number of currently registered containers.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Recomputes one node's resolved insets from its policy, the latest
    /// raw chrome, and the keyboard state, and stores them in its cache.
    ///
    /// Edges a claiming ancestor already absorbs resolve to zero locally.
    fn recompute(&mut self, handle: NodeHandle) -> Option<InsetEdges> {
        let policy = {
            let entry = self.registry.get(handle)?;
            let host = entry.host.upgrade()?;
            let policy = host.borrow().region_policy();
            policy
        };
        let keyboard = self.keyboard.state();
        let base = self.raw.base_chrome();

        let mut resolved = InsetEdges::ZERO;
        for edge in Edge::ALL {
            let value = if has_claiming_ancestor(&self.registry, handle, edge) {
                0.0
            } else {
                resolve_edge(policy.for_edge(edge), base.get(edge), edge, keyboard)
            };
            resolved = resolved.with_edge(edge, value);
        }

        if let Some(entry) = self.registry.get_mut(handle) {
            entry.cache.store(resolved);
        }
        Some(resolved)
    }

    /// Recomputes and pushes padding to one node's container.
    fn apply(&mut self, handle: NodeHandle) {
        let Some(resolved) = self.recompute(handle) else {
            return;
        };
        let Some(host) = self.registry.get(handle).and_then(|e| e.host.upgrade()) else {
            return;
        };
        host.borrow_mut().apply_padding(resolved);
    }

    /// Applies one node now, or captures it for settle-time replay while
    /// a keyboard transition is in flight.
    fn request_apply(&mut self, handle: NodeHandle) {
        if self.animation.is_deferring() {
            self.animation.capture(handle);
        } else {
            self.apply(handle);
        }
    }

    fn request_apply_subtree(&mut self, root: NodeHandle) {
        if self.animation.is_deferring() {
            self.animation.capture(root);
        } else {
            self.apply_subtree(root);
        }
    }

    /// Recomputes and applies every dirty node in `root`'s registered
    /// subtree (`root` included). Nodes resolve independently - a node's
    /// value depends on ancestor policies, not ancestor caches - so no
    /// ordering between them is required.
    fn apply_subtree(&mut self, root: NodeHandle) {
        for handle in self.registry.live_handles() {
            let in_subtree = handle == root || self.registry.is_descendant_of(handle, root);
            if !in_subtree {
                continue;
            }
            if self.registry.get(handle).is_some_and(|e| e.cache.is_dirty()) {
                self.apply(handle);
            }
        }
    }

    fn apply_all_dirty(&mut self) {
        for handle in self.registry.live_handles() {
            if self.registry.get(handle).is_some_and(|e| e.cache.is_dirty()) {
                self.apply(handle);
            }
        }
    }

    /// Dirties a node and its registered subtree.
    fn invalidate_subtree(&mut self, root: NodeHandle) {
        for handle in self.registry.live_handles() {
            if handle == root || self.registry.is_descendant_of(handle, root) {
                if let Some(entry) = self.registry.get_mut(handle) {
                    entry.cache.invalidate();
                }
            }
        }
    }

    /// Sweeps dropped containers and cancels any replay that targeted
    /// them.
    fn prune_dead(&mut self) {
        for handle in self.registry.sweep() {
            self.animation.cancel(handle);
            if self.deferred == Some(handle) {
                self.deferred = None;
            }
        }
    }
}

impl Default for InsetCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;

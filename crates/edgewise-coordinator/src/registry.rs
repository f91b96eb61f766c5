//! Weak-reference registry of inset-aware containers.
//!
//! Containers can be dropped by their owner at any time, so the registry
//! holds weak references keyed by generational handles: freeing a slot
//! bumps its generation, which invalidates every handle that pointed at
//! the old occupant. Dead weak references are swept opportunistically on
//! registry mutation; the sweep is soft-state garbage collection, not a
//! correctness requirement, but without it a long-lived hierarchy with
//! attach/detach churn grows without bound.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use edgewise_geometry::InsetEdges;

use crate::cache::InsetCache;
use crate::constants::{INITIAL_REGISTRY_CAPACITY, MAX_ANCESTOR_HOPS};
use crate::host::InsetHost;

/// Generational handle to a registered container.
///
/// Stale handles (outlived by their slot's generation) are rejected by
/// every lookup, so operations on detached containers degrade to no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    slot: u32,
    generation: u32,
}

impl NodeHandle {
    #[cfg(test)]
    pub(crate) fn for_tests(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

/// Registry entry for one live container.
pub(crate) struct NodeEntry {
    pub(crate) host: Weak<RefCell<dyn InsetHost>>,
    pub(crate) parent: Option<NodeHandle>,
    /// Pre-coordinator padding, captured exactly once at registration and
    /// restored on teardown regardless of intervening recomputations.
    pub(crate) original_padding: InsetEdges,
    pub(crate) cache: InsetCache,
}

struct Slot {
    generation: u32,
    entry: Option<NodeEntry>,
}

pub(crate) struct NodeRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl NodeRegistry {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::with_capacity(INITIAL_REGISTRY_CAPACITY),
            free: Vec::new(),
        }
    }

    /// Registers a container, capturing its pre-coordinator padding and
    /// firing its `on_register` hook.
    ///
    /// Registration is idempotent by container identity (pointer identity,
    /// not structural equality): re-registering a live container returns
    /// its existing handle without re-capturing padding or re-firing hooks.
    pub(crate) fn register(
        &mut self,
        host: &Rc<RefCell<dyn InsetHost>>,
        parent: Option<NodeHandle>,
    ) -> NodeHandle {
        if let Some(existing) = self.handle_of(host) {
            log::debug!("container already registered as {existing:?}");
            return existing;
        }

        let original_padding = host.borrow().current_padding();
        host.borrow_mut().on_register();

        let entry = NodeEntry {
            host: Rc::downgrade(host),
            parent,
            original_padding,
            cache: InsetCache::new(),
        };

        match self.free.pop() {
            Some(slot) => {
                let index = slot as usize;
                self.slots[index].entry = Some(entry);
                NodeHandle {
                    slot,
                    generation: self.slots[index].generation,
                }
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                NodeHandle {
                    slot,
                    generation: 0,
                }
            }
        }
    }

    /// Finds the handle for a live container by pointer identity.
    pub(crate) fn handle_of(&self, host: &Rc<RefCell<dyn InsetHost>>) -> Option<NodeHandle> {
        let key = Rc::as_ptr(host) as *const () as usize;
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let entry = slot.entry.as_ref()?;
            let live = entry.host.upgrade()?;
            if Rc::as_ptr(&live) as *const () as usize == key {
                Some(NodeHandle {
                    slot: index as u32,
                    generation: slot.generation,
                })
            } else {
                None
            }
        })
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&NodeEntry> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut NodeEntry> {
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    pub(crate) fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Removes an entry, splicing children of the removed node onto its
    /// parent so descendants re-resolve against the next surviving
    /// ancestor. The slot's generation bump invalidates stale handles.
    pub(crate) fn remove(&mut self, handle: NodeHandle) -> Option<NodeEntry> {
        let grandparent = self.get(handle)?.parent;
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                if entry.parent == Some(handle) {
                    entry.parent = grandparent;
                }
            }
        }

        let slot = &mut self.slots[handle.slot as usize];
        let entry = slot.entry.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot);
        entry
    }

    /// Sweeps entries whose container has been dropped, returning the
    /// handles that were reclaimed.
    pub(crate) fn sweep(&mut self) -> SmallVec<[NodeHandle; 4]> {
        let dead: SmallVec<[NodeHandle; 4]> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let entry = slot.entry.as_ref()?;
                if entry.host.upgrade().is_none() {
                    Some(NodeHandle {
                        slot: index as u32,
                        generation: slot.generation,
                    })
                } else {
                    None
                }
            })
            .collect();
        for handle in &dead {
            self.remove(*handle);
        }
        dead
    }

    pub(crate) fn live_handles(&self) -> SmallVec<[NodeHandle; 8]> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.entry.as_ref().map(|_| NodeHandle {
                    slot: index as u32,
                    generation: slot.generation,
                })
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                entry.cache.invalidate();
            }
        }
    }

    /// True if `ancestor` appears on `node`'s parent chain. The walk is
    /// bounded like the ownership walk, so cyclic chains terminate.
    pub(crate) fn is_descendant_of(&self, node: NodeHandle, ancestor: NodeHandle) -> bool {
        let mut current = match self.get(node) {
            Some(entry) => entry.parent,
            None => return false,
        };
        for _ in 0..MAX_ANCESTOR_HOPS {
            match current {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = self.get(parent).and_then(|e| e.parent),
                None => return false,
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgewise_geometry::RegionPolicy;

    struct StubHost;

    impl InsetHost for StubHost {
        fn region_policy(&self) -> RegionPolicy {
            RegionPolicy::edge_to_edge()
        }

        fn current_padding(&self) -> InsetEdges {
            InsetEdges::uniform(2.0)
        }

        fn apply_padding(&mut self, _padding: InsetEdges) {}
    }

    fn stub() -> Rc<RefCell<dyn InsetHost>> {
        Rc::new(RefCell::new(StubHost))
    }

    #[test]
    fn register_is_idempotent_by_identity() {
        let mut registry = NodeRegistry::new();
        let host = stub();
        let a = registry.register(&host, None);
        let b = registry.register(&host, None);
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);

        let other = stub();
        let c = registry.register(&other, None);
        assert_ne!(a, c);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removal_invalidates_stale_handles_and_reuses_slots() {
        let mut registry = NodeRegistry::new();
        let host = stub();
        let handle = registry.register(&host, None);
        assert!(registry.remove(handle).is_some());
        assert!(!registry.contains(handle));
        assert!(registry.remove(handle).is_none());

        // The freed slot is reused under a new generation.
        let next = registry.register(&stub(), None);
        assert!(registry.contains(next));
        assert!(!registry.contains(handle));
    }

    #[test]
    fn sweep_reclaims_dropped_containers() {
        let mut registry = NodeRegistry::new();
        let kept = stub();
        registry.register(&kept, None);
        {
            let dropped = stub();
            registry.register(&dropped, None);
            assert_eq!(registry.len(), 2);
        }
        let swept = registry.sweep();
        assert_eq!(swept.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_splices_children_onto_grandparent() {
        let mut registry = NodeRegistry::new();
        let (root, middle, leaf) = (stub(), stub(), stub());
        let root_h = registry.register(&root, None);
        let middle_h = registry.register(&middle, Some(root_h));
        let leaf_h = registry.register(&leaf, Some(middle_h));

        assert!(registry.is_descendant_of(leaf_h, middle_h));
        registry.remove(middle_h);
        assert_eq!(registry.get(leaf_h).unwrap().parent, Some(root_h));
        assert!(registry.is_descendant_of(leaf_h, root_h));
    }

    #[test]
    fn descendant_walk_terminates_on_cycles() {
        let mut registry = NodeRegistry::new();
        let (a, b) = (stub(), stub());
        let a_h = registry.register(&a, None);
        let b_h = registry.register(&b, Some(a_h));
        registry.get_mut(a_h).unwrap().parent = Some(b_h);

        let unrelated = registry.register(&stub(), None);
        assert!(!registry.is_descendant_of(a_h, unrelated));
    }
}

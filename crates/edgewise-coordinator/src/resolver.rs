//! Ownership resolution: which container in a chain absorbs an edge.

use edgewise_geometry::Edge;

use crate::constants::MAX_ANCESTOR_HOPS;
use crate::registry::{NodeHandle, NodeRegistry};

/// Walks the node's ancestor chain looking for a container that claims
/// responsibility for `edge`, short-circuiting on the first claimant.
///
/// A node must not re-apply an edge an ancestor already absorbs, so a
/// `true` result resolves the edge to zero locally. Scrollable viewports
/// are transparent to insets: they never claim, and the walk continues
/// past them to the next layout ancestor. The walk is bounded by
/// [`MAX_ANCESTOR_HOPS`]; exceeding the bound (malformed or cyclic chains)
/// degrades to "no claiming ancestor", so the node pads itself rather than
/// risking content under system chrome. Dead or stale parent links
/// likewise end the walk without a claimant.
pub(crate) fn has_claiming_ancestor(
    registry: &NodeRegistry,
    node: NodeHandle,
    edge: Edge,
) -> bool {
    let mut current = match registry.get(node) {
        Some(entry) => entry.parent,
        None => return false,
    };
    let mut hops = 0usize;

    while let Some(parent) = current {
        if hops >= MAX_ANCESTOR_HOPS {
            log::warn!(
                "ownership walk for {node:?}/{edge:?} exceeded {MAX_ANCESTOR_HOPS} hops; \
                 treating edge as unclaimed"
            );
            return false;
        }
        let Some(entry) = registry.get(parent) else {
            return false;
        };
        if let Some(host) = entry.host.upgrade() {
            let host = host.borrow();
            if !host.is_scroll_viewport() && host.region_policy().for_edge(edge).claims_chrome() {
                return true;
            }
        }
        current = entry.parent;
        hops += 1;
    }
    false
}

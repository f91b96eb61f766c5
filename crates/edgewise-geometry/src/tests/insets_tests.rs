use super::{Edge, InsetEdges};

#[test]
fn new_clamps_negative_components() {
    let insets = InsetEdges::new(-1.0, 24.0, -0.5, 48.0);
    assert_eq!(insets, InsetEdges::new(0.0, 24.0, 0.0, 48.0));
}

#[test]
fn union_takes_component_wise_max() {
    let bars = InsetEdges::new(0.0, 24.0, 0.0, 48.0);
    let cutout = InsetEdges::new(0.0, 32.0, 16.0, 0.0);
    let merged = bars.union(cutout);
    assert_eq!(merged, InsetEdges::new(0.0, 32.0, 16.0, 48.0));
}

#[test]
fn get_matches_edge_components() {
    let insets = InsetEdges::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(insets.get(Edge::Left), 1.0);
    assert_eq!(insets.get(Edge::Top), 2.0);
    assert_eq!(insets.get(Edge::Right), 3.0);
    assert_eq!(insets.get(Edge::Bottom), 4.0);
}

#[test]
fn with_edge_replaces_single_component() {
    let insets = InsetEdges::ZERO.with_edge(Edge::Bottom, 48.0);
    assert_eq!(insets, InsetEdges::new(0.0, 0.0, 0.0, 48.0));
    assert_eq!(insets.with_edge(Edge::Bottom, -5.0), InsetEdges::ZERO);
}

#[test]
fn uniform_and_is_zero() {
    assert!(InsetEdges::ZERO.is_zero());
    assert!(InsetEdges::uniform(-3.0).is_zero());
    assert!(!InsetEdges::uniform(2.0).is_zero());
}

use super::{resolve_edge, KeyboardState, RegionPolicy, SafeAreaRegions};
use crate::insets::{Edge, InsetEdges};

fn keyboard(bottom: f32, showing: bool) -> KeyboardState {
    KeyboardState {
        insets: InsetEdges::new(0.0, 0.0, 0.0, bottom),
        showing,
    }
}

#[test]
fn none_and_default_resolve_to_zero() {
    let kb = keyboard(300.0, true);
    assert_eq!(resolve_edge(SafeAreaRegions::NONE, 24.0, Edge::Top, kb), 0.0);
    assert_eq!(
        resolve_edge(SafeAreaRegions::DEFAULT, 24.0, Edge::Top, kb),
        0.0
    );
    assert_eq!(
        resolve_edge(SafeAreaRegions::DEFAULT, 48.0, Edge::Bottom, kb),
        0.0
    );
}

#[test]
fn all_and_container_respect_raw() {
    let kb = keyboard(300.0, true);
    assert_eq!(resolve_edge(SafeAreaRegions::ALL, 24.0, Edge::Top, kb), 24.0);
    assert_eq!(
        resolve_edge(SafeAreaRegions::CONTAINER, 16.0, Edge::Left, kb),
        16.0
    );
}

#[test]
fn container_does_not_add_keyboard_on_bottom() {
    let kb = keyboard(300.0, true);
    assert_eq!(
        resolve_edge(SafeAreaRegions::CONTAINER, 48.0, Edge::Bottom, kb),
        48.0
    );
}

#[test]
fn soft_input_alone_tracks_keyboard_only() {
    // Static bar insets are ignored by a keyboard-only opt-in.
    assert_eq!(
        resolve_edge(
            SafeAreaRegions::SOFT_INPUT,
            48.0,
            Edge::Bottom,
            keyboard(300.0, true)
        ),
        300.0
    );
    assert_eq!(
        resolve_edge(
            SafeAreaRegions::SOFT_INPUT,
            48.0,
            Edge::Bottom,
            keyboard(300.0, false)
        ),
        0.0
    );
}

#[test]
fn soft_input_combined_takes_max_of_raw_and_keyboard() {
    let flags = SafeAreaRegions::CONTAINER | SafeAreaRegions::SOFT_INPUT;
    assert_eq!(
        resolve_edge(flags, 48.0, Edge::Bottom, keyboard(300.0, true)),
        300.0
    );
    // Hidden keyboard degrades to the static intrusion.
    assert_eq!(
        resolve_edge(flags, 48.0, Edge::Bottom, keyboard(300.0, false)),
        48.0
    );
    // A keyboard shorter than the navigation bar never shrinks the inset.
    assert_eq!(
        resolve_edge(flags, 48.0, Edge::Bottom, keyboard(20.0, true)),
        48.0
    );
}

#[test]
fn soft_input_off_bottom_edge_fails_safe_to_raw() {
    assert_eq!(
        resolve_edge(
            SafeAreaRegions::SOFT_INPUT,
            24.0,
            Edge::Top,
            keyboard(300.0, true)
        ),
        24.0
    );
}

#[test]
fn unexpected_combinations_fail_safe_to_raw() {
    // DEFAULT is mutually exclusive with other flags by convention only;
    // a malformed combination still respects the intrusion.
    let flags = SafeAreaRegions::DEFAULT | SafeAreaRegions::ALL;
    assert_eq!(
        resolve_edge(flags, 24.0, Edge::Top, keyboard(0.0, false)),
        24.0
    );
}

#[test]
fn policy_default_is_default_flags_on_every_edge() {
    let policy = RegionPolicy::default();
    for edge in Edge::ALL {
        assert_eq!(policy.for_edge(edge), SafeAreaRegions::DEFAULT);
        assert!(!policy.for_edge(edge).claims_chrome());
    }
    assert!(!policy.claims_any_chrome());
}

#[test]
fn policy_with_edge_is_per_edge() {
    let policy = RegionPolicy::edge_to_edge().with_edge(Edge::Bottom, SafeAreaRegions::SOFT_INPUT);
    assert_eq!(policy.for_edge(Edge::Bottom), SafeAreaRegions::SOFT_INPUT);
    assert_eq!(policy.for_edge(Edge::Top), SafeAreaRegions::NONE);
    assert!(policy.claims_any_chrome());
}

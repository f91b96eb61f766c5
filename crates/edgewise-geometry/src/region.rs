//! Per-edge safe-area region policies and the edge resolution rule.

use bitflags::bitflags;

use crate::insets::{Edge, InsetEdges};

bitflags! {
    /// How a container wants one edge's inset intrusions treated.
    ///
    /// Flags combine with `|`; the empty set means the edge ignores all
    /// intrusions (content draws edge-to-edge). `DEFAULT` is mutually
    /// exclusive with the other flags by authoring convention - this is
    /// not enforced at the type level, but [`resolve_edge`] assumes it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SafeAreaRegions: u8 {
        /// Platform-default chrome handling. For measurement purposes this
        /// behaves like the empty set (edge-to-edge); outer surfaces may
        /// opt into default chrome elsewhere.
        const DEFAULT    = 0b0001;
        /// Respect every intrusion on this edge unconditionally.
        const ALL        = 0b0010;
        /// Respect bars and cutouts, without specifically adding the
        /// keyboard on top.
        const CONTAINER  = 0b0100;
        /// Respect the on-screen keyboard on the keyboard-adjacent edge.
        const SOFT_INPUT = 0b1000;
    }
}

impl SafeAreaRegions {
    /// The empty set: ignore all intrusions on this edge.
    pub const NONE: Self = Self::empty();

    /// Returns true if this flag set claims responsibility for system
    /// chrome on its edge (anything beyond `NONE`/`DEFAULT`).
    pub fn claims_chrome(self) -> bool {
        self.intersects(Self::ALL | Self::CONTAINER | Self::SOFT_INPUT)
    }
}

/// A container's declared safe-area treatment, one flag set per edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionPolicy {
    pub left: SafeAreaRegions,
    pub top: SafeAreaRegions,
    pub right: SafeAreaRegions,
    pub bottom: SafeAreaRegions,
}

impl RegionPolicy {
    /// The same flag set on all four edges.
    pub const fn uniform(flags: SafeAreaRegions) -> Self {
        Self {
            left: flags,
            top: flags,
            right: flags,
            bottom: flags,
        }
    }

    /// Ignore intrusions everywhere (content draws edge-to-edge).
    pub const fn edge_to_edge() -> Self {
        Self::uniform(SafeAreaRegions::NONE)
    }

    /// Returns the flag set declared for one edge.
    pub fn for_edge(&self, edge: Edge) -> SafeAreaRegions {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Returns a copy with one edge's flags replaced.
    pub fn with_edge(self, edge: Edge, flags: SafeAreaRegions) -> Self {
        match edge {
            Edge::Left => Self { left: flags, ..self },
            Edge::Top => Self { top: flags, ..self },
            Edge::Right => Self { right: flags, ..self },
            Edge::Bottom => Self { bottom: flags, ..self },
        }
    }

    /// Returns true if any edge claims chrome.
    pub fn claims_any_chrome(&self) -> bool {
        Edge::ALL.iter().any(|e| self.for_edge(*e).claims_chrome())
    }
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self::uniform(SafeAreaRegions::DEFAULT)
    }
}

/// Keyboard-derived inset state, one per window.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct KeyboardState {
    /// Insets contributed by the on-screen keyboard (bottom in practice).
    pub insets: InsetEdges,
    /// Whether the keyboard currently occludes part of the window.
    pub showing: bool,
}

/// Resolves how much of a raw intrusion one edge must absorb under the
/// given policy flags.
///
/// `raw` is the merged static chrome for this edge (bars unioned with
/// cutouts); the keyboard participates only through `SOFT_INPUT`:
///
/// - empty / `DEFAULT` -> `0` (edge-to-edge).
/// - `SOFT_INPUT` alone on the bottom edge -> the keyboard inset while
///   showing, `0` otherwise (keyboard-only opt-in, static bars ignored).
/// - `SOFT_INPUT` combined with other flags on the bottom edge -> the
///   larger of `raw` and the showing keyboard inset.
/// - everything else (`ALL`, `CONTAINER`, unexpected combinations) ->
///   `raw`. When in doubt, respect the intrusion.
pub fn resolve_edge(
    flags: SafeAreaRegions,
    raw: f32,
    edge: Edge,
    keyboard: KeyboardState,
) -> f32 {
    if flags.is_empty() || flags == SafeAreaRegions::DEFAULT {
        return 0.0;
    }
    if edge == Edge::Bottom && flags.contains(SafeAreaRegions::SOFT_INPUT) {
        let soft = if keyboard.showing {
            keyboard.insets.bottom
        } else {
            0.0
        };
        if flags == SafeAreaRegions::SOFT_INPUT {
            return soft;
        }
        return raw.max(soft);
    }
    raw
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;

//! Canonical four-edge inset values in logical pixels.

/// One edge of a container's bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// All four edges, in resolution order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}

/// Per-edge inset thickness describing how far system chrome intrudes
/// into the window's drawable area.
///
/// Components are always >= 0; constructors clamp negative input.
/// This is an immutable value type - combining two insets is done with
/// [`InsetEdges::union`], which takes the component-wise maximum.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct InsetEdges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl InsetEdges {
    /// Zero insets on every edge.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Creates insets from individual components, clamping negatives to zero.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Creates insets with the same thickness on every edge.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the thickness of a single edge.
    pub fn get(self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Returns a copy with one edge replaced (clamped to zero).
    pub fn with_edge(self, edge: Edge, value: f32) -> Self {
        let value = value.max(0.0);
        match edge {
            Edge::Left => Self { left: value, ..self },
            Edge::Top => Self { top: value, ..self },
            Edge::Right => Self { right: value, ..self },
            Edge::Bottom => Self { bottom: value, ..self },
        }
    }

    /// Component-wise maximum of two insets.
    ///
    /// Used to merge overlapping intrusions (e.g. a navigation bar and a
    /// display cutout on the same edge) without double-counting them.
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Returns true if every edge is zero.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

#[cfg(test)]
#[path = "tests/insets_tests.rs"]
mod tests;

//! Safe-area inset distribution for nested container trees.
//!
//! The coordinator takes raw, asynchronously-reported screen intrusions
//! (status/navigation bars, display cutouts, the on-screen keyboard) and
//! distributes them across registered containers so each intrusion is
//! compensated by exactly one container, chosen by declared per-edge
//! policy. Double consumption shows up as visible double margins; missed
//! consumption puts content under system bars - both are prevented by
//! resolving edge ownership against the ancestor chain before padding is
//! applied.
//!
//! Keyboard show/hide transitions are coalesced: applies observed while a
//! transition is in flight are replayed exactly once on settle, using the
//! most recently observed values.

mod animation;
mod cache;
mod constants;
mod coordinator;
mod host;
mod keyboard;
mod registry;
mod resolver;

pub use animation::{AnimationPhase, TypeMask};
pub use constants::*;
pub use coordinator::{InsetCoordinator, RawInsetEvent};
pub use host::InsetHost;
pub use registry::NodeHandle;

pub mod prelude {
    pub use crate::animation::TypeMask;
    pub use crate::coordinator::{InsetCoordinator, RawInsetEvent};
    pub use crate::host::InsetHost;
    pub use crate::registry::NodeHandle;
    pub use edgewise_geometry::prelude::*;
}

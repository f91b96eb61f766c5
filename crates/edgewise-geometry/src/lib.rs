//! Inset value types & per-edge safe-area policies for Edgewise

mod insets;
mod region;

pub use insets::*;
pub use region::*;

pub mod prelude {
    pub use crate::insets::{Edge, InsetEdges};
    pub use crate::region::{KeyboardState, RegionPolicy, SafeAreaRegions};
}

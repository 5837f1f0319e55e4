//! # System Canvas
//!
//! Derives the scroll-driven system visualization from narrative state. This
//! crate reads `narrative_state` and never writes to it.
//!
//! ## Core Components
//!
//! - **topology**: Rule-based generator producing the node/edge graph
//! - **visibility**: Per-layer opacity from complexity and focus
//! - **diagram**: Projection of graph and opacities into draw calls
//! - **snapshot**: The full pipeline for one effective state

pub mod diagram;
pub mod snapshot;
pub mod topology;
pub mod visibility;

pub use diagram::*;
pub use snapshot::*;
pub use topology::*;
pub use visibility::*;

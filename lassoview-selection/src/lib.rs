//! # lassoview selection
//!
//! CPU-side resolution of a screen-space lasso against a 3D scene.
//!
//! No GPU readback is involved: pointer positions and world geometry are both mapped
//! into normalized device coordinates and compared with an even-odd containment test.
//! - Coordinate projection of world and screen points
//! - Point-in-polygon testing
//! - Per-mesh face selection with bounded, stride-sampled cost
//! - Whole-object candidacy for lights, cameras and empty nodes
//! - Aggregation into a [`SelectionResult`] with per-node failure isolation

pub mod config;
pub mod projector;
pub mod polygon;
pub mod face_selector;
pub mod candidacy;
pub mod resolver;
pub mod diagnostics;

// Re-export commonly used items
pub use config::*;
pub use projector::*;
pub use polygon::ClosedPolygon;
pub use face_selector::*;
pub use candidacy::*;
pub use resolver::*;
pub use diagnostics::*;

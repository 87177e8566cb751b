//! Core data structures and traits for lassoview
//!
//! This crate provides the scene-side types the lasso selection engine works on:
//! screen, normalized and projected points, mesh triangle buffers, a read-only scene
//! accessor with a simple hierarchical scene graph, the viewing camera, and the
//! shared error and logging setup.

pub mod point;
pub mod mesh;
pub mod scene;
pub mod camera;
pub mod traits;
pub mod transform;
pub mod error;
pub mod logging;

pub use point::*;
pub use mesh::*;
pub use scene::*;
pub use camera::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

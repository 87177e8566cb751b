//! # lassoview
//!
//! Screen-space lasso selection of objects and mesh faces in 3D scenes.
//!
//! This is the umbrella crate that provides convenient access to all lassoview
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, mesh buffers, scene graph, camera, errors and logging setup
//! - **Selection**: Projection, point-in-polygon, face sampling and candidacy resolution
//! - **Interaction**: The lasso tool state machine, overlay feedback and debug markers
//!
//! ## Quick Start
//!
//! ```rust
//! use lassoview::prelude::*;
//!
//! let mut scene = Scene::new();
//! let triangle = MeshGeometry::from_triangle_soup(vec![
//!     Point3f::new(-0.5, -0.5, 0.0),
//!     Point3f::new(0.5, -0.5, 0.0),
//!     Point3f::new(0.0, 0.5, 0.0),
//! ]);
//! let id = scene.add(NodeDesc::mesh("triangle", triangle));
//!
//! let viewport = Viewport::new(800.0, 600.0).unwrap();
//! let lasso = ClosedPolygon::from_screen_path(
//!     &[
//!         ScreenPoint::new(0.0, 0.0),
//!         ScreenPoint::new(800.0, 0.0),
//!         ScreenPoint::new(800.0, 600.0),
//!         ScreenPoint::new(0.0, 600.0),
//!     ],
//!     &viewport,
//! )
//! .unwrap();
//!
//! let result = SelectionResolver::default().resolve_scene(
//!     &scene,
//!     &Camera::default(),
//!     &lasso,
//!     &TracingDiagnostics,
//! )
//! .unwrap();
//! assert!(result.contains_object(id));
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, selection and interaction
//! - `selection`: CPU selection engine
//! - `interaction`: Lasso tool (implies `selection`)
//! - `all`: Enables all features

// Re-export core functionality
pub use lassoview_core::*;

// Re-export sub-crates
#[cfg(feature = "selection")]
pub use lassoview_selection as selection;

#[cfg(feature = "interaction")]
pub use lassoview_interaction as interaction;

/// Convenient imports for common use cases
pub mod prelude {
    pub use lassoview_core::*;

    #[cfg(feature = "selection")]
    pub use lassoview_selection::*;

    #[cfg(feature = "interaction")]
    pub use lassoview_interaction::*;
}

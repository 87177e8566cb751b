//! Whole-node candidacy by a single representative point
//!
//! Lights, cameras and empty transforms have no triangles, so they are tested by
//! one point: the center of their world bounds when they have any, otherwise their
//! world origin. Meshes use the same test as a fallback when face sampling found
//! nothing anywhere in the scene.

use crate::polygon::ClosedPolygon;
use crate::projector::project_world_point;
use lassoview_core::{Matrix4, Point3f, SceneNode};

/// World point standing in for the whole node
pub fn representative_point(node: &SceneNode) -> Point3f {
    node.world_bounds()
        .map(|bounds| bounds.center())
        .unwrap_or_else(|| node.world_transform.origin())
}

/// Whether the node's representative point projects inside `polygon`.
///
/// Hidden nodes and points failing the visibility test are never candidates.
pub fn is_candidate(
    node: &SceneNode,
    polygon: &ClosedPolygon,
    view_projection: &Matrix4<f32>,
) -> bool {
    if !node.visible {
        return false;
    }
    let projected = project_world_point(&representative_point(node), view_projection);
    projected.is_visible() && polygon.contains(projected.to_ndc())
}

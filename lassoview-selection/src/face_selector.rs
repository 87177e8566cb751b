//! Per-mesh triangle selection by projected centroid
//!
//! Each candidate triangle is transformed to world space, projected, and its screen
//! centroid tested against the lasso. Work per mesh is bounded by stride sampling:
//! only every `stride`-th triangle is evaluated, with the stride derived from a fixed
//! cap. This trades accuracy on dense meshes for a predictable cost.

use crate::config::{SelectionConfig, MAX_FACE_DIAGNOSTICS};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::polygon::ClosedPolygon;
use crate::projector::project_world_point;
use lassoview_core::{Error, Matrix4, NdcPoint, Point3f, Result, SceneNode};

/// Which triangles of a mesh get evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub triangle_count: usize,
    pub stride: usize,
}

impl SamplingPlan {
    /// `stride = max(1, floor(triangle_count / cap))`; a zero cap is treated as one
    pub fn new(triangle_count: usize, cap: usize) -> Self {
        let stride = (triangle_count / cap.max(1)).max(1);
        Self {
            triangle_count,
            stride,
        }
    }

    /// Number of triangles the plan visits, `ceil(triangle_count / stride)`
    pub fn evaluated_count(&self) -> usize {
        self.triangle_count.div_ceil(self.stride)
    }

    /// Evenly spaced face indices `0, stride, 2 * stride, ...` below the count
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (0..self.triangle_count).step_by(self.stride)
    }
}

/// Selects faces of one mesh under a lasso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSelector {
    cap: usize,
}

impl Default for FaceSelector {
    fn default() -> Self {
        Self::new(&SelectionConfig::default())
    }
}

impl FaceSelector {
    pub fn new(config: &SelectionConfig) -> Self {
        Self::with_cap(config.face_sample_cap)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self { cap: cap.max(1) }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Sampling plan for `node`, `None` if the node has nothing to sample
    pub fn plan(&self, node: &SceneNode) -> Option<SamplingPlan> {
        let geometry = node.geometry.as_ref().filter(|g| g.has_positions())?;
        Some(SamplingPlan::new(geometry.triangle_count(), self.cap))
    }

    /// Indices of sampled faces whose projected centroid lies inside `polygon`.
    ///
    /// Hidden meshes and meshes without positions yield nothing. A triangle with any
    /// vertex failing the visibility test is skipped whole. Malformed triangles are
    /// reported to `diagnostics` and skipped; the scan always runs to the end.
    pub fn select_faces(
        &self,
        node: &SceneNode,
        polygon: &ClosedPolygon,
        view_projection: &Matrix4<f32>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Vec<usize> {
        if !node.visible {
            return Vec::new();
        }
        let (Some(geometry), Some(plan)) = (node.geometry.as_ref(), self.plan(node)) else {
            return Vec::new();
        };

        // Fold model and view-projection once per mesh
        let model_view_projection = view_projection * node.world_transform.matrix;

        let mut selected = Vec::new();
        let mut failures = 0usize;
        for face in plan.indices() {
            match geometry.triangle(face) {
                Ok(triangle) => {
                    if let Some(centroid) = project_centroid(&triangle, &model_view_projection) {
                        if polygon.contains(centroid) {
                            selected.push(face);
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    if failures <= MAX_FACE_DIAGNOSTICS {
                        diagnostics.report(Diagnostic::face(node.id, face, e.to_string()));
                    }
                }
            }
        }

        if failures > MAX_FACE_DIAGNOSTICS {
            diagnostics.report(Diagnostic::node(
                node.id,
                format!(
                    "{} further malformed triangles not reported individually",
                    failures - MAX_FACE_DIAGNOSTICS
                ),
            ));
        }

        tracing::trace!(
            node = node.id.0,
            evaluated = plan.evaluated_count(),
            stride = plan.stride,
            selected = selected.len(),
            "face scan finished"
        );
        selected
    }
}

/// Mean of the three projected vertices, `None` if any vertex is not visible
fn project_centroid(
    triangle: &[Point3f; 3],
    model_view_projection: &Matrix4<f32>,
) -> Option<NdcPoint> {
    let mut projected = [NdcPoint::default(); 3];
    for (slot, vertex) in projected.iter_mut().zip(triangle) {
        let p = project_world_point(vertex, model_view_projection);
        if !p.is_visible() {
            return None;
        }
        *slot = p.to_ndc();
    }
    NdcPoint::mean(&projected)
}

/// World-space centroid of one face of a mesh node
pub fn face_world_centroid(node: &SceneNode, face: usize) -> Result<Point3f> {
    let geometry = node
        .geometry
        .as_ref()
        .ok_or_else(|| Error::InvalidData(format!("node {} has no geometry", node.id)))?;
    let [a, b, c] = geometry.triangle(face)?;
    let local = Point3f::from((a.coords + b.coords + c.coords) / 3.0);
    Ok(node.world_transform.transform_point(&local))
}

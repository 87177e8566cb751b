//! Aggregation of face and object candidacy into one selection result

use crate::candidacy::is_candidate;
use crate::config::SelectionConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::face_selector::FaceSelector;
use crate::polygon::ClosedPolygon;
use lassoview_core::{CameraSource, Matrix4, NodeId, Result, SceneAccessor, SceneNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One triangle of one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceRef {
    pub node: NodeId,
    pub face: usize,
}

/// Outcome of one completed lasso gesture.
///
/// A mesh is listed in `objects` when it contributed at least one face, or through
/// the whole-object fallback when no mesh contributed any. Non-mesh nodes are listed
/// when their own candidacy test passed. Every face belongs to a listed mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub objects: BTreeSet<NodeId>,
    pub faces: BTreeSet<FaceRef>,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.faces.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn contains_object(&self, node: NodeId) -> bool {
        self.objects.contains(&node)
    }

    /// Face indices selected on `node`, ascending
    pub fn faces_of(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        self.faces
            .range(FaceRef { node, face: 0 }..=FaceRef { node, face: usize::MAX })
            .map(|f| f.face)
    }
}

/// Runs face selection over meshes and candidacy over everything else
#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    faces: FaceSelector,
}

impl SelectionResolver {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            faces: FaceSelector::new(config),
        }
    }

    pub fn face_selector(&self) -> &FaceSelector {
        &self.faces
    }

    /// Resolve against the scene and camera as they are right now.
    ///
    /// Fails without looking at any node when the camera has no valid projection.
    pub fn resolve_scene(
        &self,
        scene: &dyn SceneAccessor,
        camera: &dyn CameraSource,
        polygon: &ClosedPolygon,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<SelectionResult> {
        let view_projection = camera.view_projection()?;
        let nodes = scene.snapshot();
        Ok(self.resolve(&nodes, polygon, &view_projection, diagnostics))
    }

    /// Resolve against an explicit node list.
    ///
    /// A failure on one node never stops the pass; it is reported and the node
    /// contributes nothing.
    pub fn resolve(
        &self,
        nodes: &[SceneNode],
        polygon: &ClosedPolygon,
        view_projection: &Matrix4<f32>,
        diagnostics: &dyn DiagnosticSink,
    ) -> SelectionResult {
        let mut result = SelectionResult::default();
        let mut unmatched_meshes = Vec::new();

        for node in nodes.iter().filter(|n| n.visible) {
            if !node.is_mesh() {
                if is_candidate(node, polygon, view_projection) {
                    result.objects.insert(node.id);
                }
                continue;
            }

            if self.faces.plan(node).is_none() {
                diagnostics.report(Diagnostic::node(node.id, "mesh has no position data"));
                continue;
            }

            let faces = self
                .faces
                .select_faces(node, polygon, view_projection, diagnostics);
            if faces.is_empty() {
                unmatched_meshes.push(node);
            } else {
                result.objects.insert(node.id);
                result
                    .faces
                    .extend(faces.into_iter().map(|face| FaceRef { node: node.id, face }));
            }
        }

        // Small or coarse meshes can slip between sampled centroids entirely
        if result.faces.is_empty() {
            for node in unmatched_meshes {
                if is_candidate(node, polygon, view_projection) {
                    result.objects.insert(node.id);
                }
            }
        }

        tracing::debug!(
            objects = result.objects.len(),
            faces = result.faces.len(),
            "lasso resolved"
        );
        result
    }
}

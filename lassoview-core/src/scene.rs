//! Read-only scene enumeration used by the selection engine
//!
//! The selection engine never walks a renderer's scene graph directly. It asks a
//! [`SceneAccessor`] for a flat snapshot of nodes with their world transforms
//! resolved at call time, so nothing is cached between gestures.

use crate::mesh::MeshGeometry;
use crate::traits::{Aabb, Bounded};
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Opaque handle of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of node kinds, resolved once when a node enters the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Mesh,
    Light,
    Camera,
    Other,
}

/// One node as seen by the selection engine
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub world_transform: Transform3D,
    /// Effective visibility: false if the node or any ancestor is hidden
    pub visible: bool,
    /// Triangle buffers, only ever present on [`NodeKind::Mesh`] nodes
    pub geometry: Option<Arc<MeshGeometry>>,
    /// Local bounds for non-mesh nodes that carry extent data
    pub bounds: Option<Aabb>,
}

impl SceneNode {
    pub fn is_mesh(&self) -> bool {
        self.kind == NodeKind::Mesh
    }

    /// World-space bounding box, from the geometry or the explicit bounds
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.bounding_box()
            .map(|local| self.world_transform.transform_aabb(&local))
    }
}

impl Bounded for SceneNode {
    fn bounding_box(&self) -> Option<Aabb> {
        self.geometry
            .as_ref()
            .and_then(|g| g.bounding_box())
            .or(self.bounds)
    }
}

/// Enumeration of the live scene
pub trait SceneAccessor {
    /// All nodes with world transforms and visibility resolved as of this call
    fn snapshot(&self) -> Vec<SceneNode>;
}

impl<T: SceneAccessor + ?Sized> SceneAccessor for Rc<RefCell<T>> {
    fn snapshot(&self) -> Vec<SceneNode> {
        self.borrow().snapshot()
    }
}

/// Description of a node to insert into a [`Scene`]
#[derive(Debug, Clone)]
pub struct NodeDesc {
    pub name: String,
    pub kind: NodeKind,
    pub local_transform: Transform3D,
    pub visible: bool,
    pub geometry: Option<Arc<MeshGeometry>>,
    pub bounds: Option<Aabb>,
}

impl NodeDesc {
    pub fn mesh(name: impl Into<String>, geometry: MeshGeometry) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Mesh,
            local_transform: Transform3D::identity(),
            visible: true,
            geometry: Some(Arc::new(geometry)),
            bounds: None,
        }
    }

    pub fn light(name: impl Into<String>) -> Self {
        Self::bare(name, NodeKind::Light)
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::bare(name, NodeKind::Camera)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::bare(name, NodeKind::Other)
    }

    fn bare(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            local_transform: Transform3D::identity(),
            visible: true,
            geometry: None,
            bounds: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.local_transform = transform;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    desc: NodeDesc,
    parent: Option<NodeId>,
}

/// Simple in-memory scene graph with parent/child transforms.
///
/// Insertion order is preserved in snapshots. Removing a node removes its subtree.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    entries: HashMap<NodeId, Entry>,
    order: Vec<NodeId>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root node
    pub fn add(&mut self, desc: NodeDesc) -> NodeId {
        self.insert(desc, None)
    }

    /// Insert a node under `parent`; an unknown parent makes it a root
    pub fn add_child(&mut self, parent: NodeId, desc: NodeDesc) -> NodeId {
        let parent = self.entries.contains_key(&parent).then_some(parent);
        self.insert(desc, parent)
    }

    fn insert(&mut self, mut desc: NodeDesc, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if desc.kind != NodeKind::Mesh {
            desc.geometry = None;
        }
        self.entries.insert(id, Entry { desc, parent });
        self.order.push(id);
        id
    }

    /// Remove a node and all of its descendants, returning how many were removed
    pub fn remove(&mut self, id: NodeId) -> usize {
        if !self.entries.contains_key(&id) {
            return 0;
        }
        let doomed: Vec<NodeId> = self
            .order
            .iter()
            .copied()
            .filter(|&n| self.is_descendant_or_self(n, id))
            .collect();
        for n in &doomed {
            self.entries.remove(n);
        }
        self.order.retain(|n| !doomed.contains(n));
        doomed.len()
    }

    fn is_descendant_or_self(&self, mut node: NodeId, ancestor: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.entries.get(&node).and_then(|e| e.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    pub fn set_local_transform(&mut self, id: NodeId, transform: Transform3D) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.desc.local_transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.desc.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// World transform and effective visibility, composed root-first
    fn resolve(&self, id: NodeId) -> (Transform3D, bool) {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.entries.get(&current) {
                Some(entry) => {
                    chain.push(entry);
                    cursor = entry.parent;
                }
                None => break,
            }
        }
        chain
            .iter()
            .rev()
            .fold((Transform3D::identity(), true), |(world, visible), entry| {
                (world * entry.desc.local_transform, visible && entry.desc.visible)
            })
    }
}

impl SceneAccessor for Scene {
    fn snapshot(&self) -> Vec<SceneNode> {
        self.order
            .iter()
            .filter_map(|&id| {
                let entry = self.entries.get(&id)?;
                let (world_transform, visible) = self.resolve(id);
                Some(SceneNode {
                    id,
                    name: entry.desc.name.clone(),
                    kind: entry.desc.kind,
                    world_transform,
                    visible,
                    geometry: entry.desc.geometry.clone(),
                    bounds: entry.desc.bounds,
                })
            })
            .collect()
    }
}

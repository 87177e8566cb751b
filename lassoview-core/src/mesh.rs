//! Triangle buffers of mesh nodes

use crate::error::{Error, Result};
use crate::point::Point3f;
use crate::traits::{Aabb, Bounded};
use serde::{Deserialize, Serialize};

/// Position buffer plus optional index buffer describing a triangle list.
///
/// Without an index buffer every three consecutive positions form one triangle.
/// Index data is not validated at construction time: out-of-range indices surface
/// as errors from [`MeshGeometry::triangle`] so one bad triangle never poisons the
/// rest of the buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshGeometry {
    positions: Vec<Point3f>,
    indices: Option<Vec<u32>>,
    bounds: Option<Aabb>,
}

impl MeshGeometry {
    /// Create an indexed geometry from vertices and triangle faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: &[[usize; 3]]) -> Self {
        let indices = faces
            .iter()
            .flat_map(|face| face.iter().map(|&i| i as u32))
            .collect();
        Self::new(vertices, Some(indices))
    }

    /// Create an unindexed geometry where every three positions form a triangle
    pub fn from_triangle_soup(positions: Vec<Point3f>) -> Self {
        Self::new(positions, None)
    }

    /// Create a geometry from raw interleaved `xyz` floats and optional indices
    pub fn from_raw(positions: &[f32], indices: Option<Vec<u32>>) -> Result<Self> {
        let triples: &[[f32; 3]] = bytemuck::try_cast_slice(positions).map_err(|e| {
            Error::InvalidData(format!(
                "position buffer of {} floats is not a list of xyz triples: {}",
                positions.len(),
                e
            ))
        })?;
        let positions = triples
            .iter()
            .map(|[x, y, z]| Point3f::new(*x, *y, *z))
            .collect();
        Ok(Self::new(positions, indices))
    }

    /// Create a geometry from an already split position and index buffer
    pub fn new(positions: Vec<Point3f>, indices: Option<Vec<u32>>) -> Self {
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    pub fn positions(&self) -> &[Point3f] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether there is any position data to select from
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Number of triangles described by the buffers.
    ///
    /// Uses the index buffer when present, the position buffer otherwise. A trailing
    /// partial triangle is ignored.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Local-space vertices of triangle `face`
    pub fn triangle(&self, face: usize) -> Result<[Point3f; 3]> {
        let base = face
            .checked_mul(3)
            .ok_or_else(|| Error::InvalidData(format!("face index {} overflows", face)))?;

        let mut out = [Point3f::origin(); 3];
        for (corner, slot) in out.iter_mut().enumerate() {
            let vertex = match &self.indices {
                Some(indices) => {
                    let raw = indices.get(base + corner).ok_or_else(|| {
                        Error::InvalidData(format!(
                            "face {} reads past the index buffer ({} entries)",
                            face,
                            indices.len()
                        ))
                    })?;
                    *raw as usize
                }
                None => base + corner,
            };
            *slot = *self.positions.get(vertex).ok_or(Error::IndexOutOfRange {
                index: vertex,
                vertex_count: self.positions.len(),
            })?;
        }
        Ok(out)
    }
}

impl Bounded for MeshGeometry {
    fn bounding_box(&self) -> Option<Aabb> {
        self.bounds
    }
}

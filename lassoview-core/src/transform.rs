//! Local and world transforms of scene nodes

use crate::point::{Point3f, Vector3f};
use crate::traits::Aabb;
use nalgebra::{Isometry3, Matrix4, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// An affine transform stored as a homogeneous 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3f) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3f,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Map a local-space point into the space this transform targets.
    ///
    /// Scene transforms are affine, so the homogeneous divide is skipped.
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        self.matrix.transform_point(point)
    }

    /// The translation part, i.e. where the local origin lands
    pub fn origin(&self) -> Point3f {
        Point3f::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Axis-aligned box enclosing the eight transformed corners of `aabb`
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut corners = aabb.corners().into_iter().map(|c| self.transform_point(&c));
        // corners() always yields eight points
        let first = corners.next().unwrap_or_else(|| self.origin());
        corners.fold(Aabb::from_point(first), |mut acc, p| {
            acc.expand(&p);
            acc
        })
    }

    /// `self * other`: apply `other` first, then `self`
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

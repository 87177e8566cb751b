//! Point types shared by the world, screen and normalized coordinate spaces

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A point in drawing-surface-local pixel coordinates.
///
/// The origin is the top-left corner of the surface and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared pixel distance to another point
    pub fn distance_squared(&self, other: &ScreenPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A point in normalized device coordinates.
///
/// The visible viewport spans `[-1, 1]` on both axes and `y` points up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NdcPoint {
    pub x: f32,
    pub y: f32,
}

impl NdcPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Arithmetic mean of a set of points, `None` when the slice is empty
    pub fn mean(points: &[NdcPoint]) -> Option<NdcPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f32;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(NdcPoint::new(sx / n, sy / n))
    }
}

/// A world point after projection through a view-projection matrix.
///
/// `z` carries the projected depth. Anything with `z > 1` lies behind the camera or
/// past its far plane and must be excluded from selection, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ProjectedPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point that fails every visibility test
    pub fn invisible() -> Self {
        Self::new(f32::NAN, f32::NAN, f32::INFINITY)
    }

    /// Whether the projected point can take part in a containment test
    pub fn is_visible(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && !(self.z > 1.0) && !self.z.is_nan()
    }

    /// Drops the depth component
    pub fn to_ndc(&self) -> NdcPoint {
        NdcPoint::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_of_points() {
        let points = [
            NdcPoint::new(0.0, 0.0),
            NdcPoint::new(1.0, 0.0),
            NdcPoint::new(0.5, 1.5),
        ];
        let mean = NdcPoint::mean(&points).unwrap();
        assert_relative_eq!(mean.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(mean.y, 0.5, epsilon = 1e-6);
        assert!(NdcPoint::mean(&[]).is_none());
    }

    #[test]
    fn test_projected_visibility() {
        assert!(ProjectedPoint::new(0.2, -0.4, 0.99).is_visible());
        assert!(ProjectedPoint::new(0.2, -0.4, 1.0).is_visible());
        assert!(!ProjectedPoint::new(0.2, -0.4, 1.01).is_visible());
        assert!(!ProjectedPoint::invisible().is_visible());
        assert!(!ProjectedPoint::new(f32::NAN, 0.0, 0.5).is_visible());
    }

    #[test]
    fn test_screen_distance() {
        let a = ScreenPoint::new(1.0, 1.0);
        let b = ScreenPoint::new(4.0, 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0, epsilon = 1e-6);
    }
}

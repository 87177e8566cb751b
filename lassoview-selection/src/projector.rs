//! Coordinate projection into the shared normalized space
//!
//! World points and pointer positions both end up in normalized device coordinates
//! before any containment test runs.

use lassoview_core::{Error, Matrix4, NdcPoint, Point3f, ProjectedPoint, Result, ScreenPoint};
use serde::{Deserialize, Serialize};

/// Pixel size of the surface the scene is rendered to.
///
/// Always sample this from the render surface when a gesture resolves. A size cached
/// at tool activation goes stale on resize and silently misaligns the two spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, rejecting empty or non-finite sizes
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(Error::InvalidViewport { width, height })
        }
    }
}

/// Project a world-space point through `view_projection`.
///
/// The result carries the post-divide depth in `z`; callers must drop points that
/// fail [`ProjectedPoint::is_visible`]. A zero `w` (the point sits on the camera
/// plane) yields an invisible point instead of infinities.
pub fn project_world_point(world: &Point3f, view_projection: &Matrix4<f32>) -> ProjectedPoint {
    let clip = view_projection * world.to_homogeneous();
    if clip.w.abs() <= f32::EPSILON {
        return ProjectedPoint::invisible();
    }
    let inv_w = 1.0 / clip.w;
    ProjectedPoint::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w)
}

/// Map a pixel position on the render surface to normalized device coordinates
pub fn project_screen_point(screen: ScreenPoint, viewport: &Viewport) -> NdcPoint {
    NdcPoint::new(
        (screen.x / viewport.width) * 2.0 - 1.0,
        -(screen.y / viewport.height) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lassoview_core::{Camera, CameraSource};

    #[test]
    fn test_screen_corners_map_to_unit_square() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();

        let top_left = project_screen_point(ScreenPoint::new(0.0, 0.0), &viewport);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let bottom_right = project_screen_point(ScreenPoint::new(800.0, 600.0), &viewport);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);

        let center = project_screen_point(ScreenPoint::new(400.0, 300.0), &viewport);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);
    }

    #[test]
    fn test_invalid_viewport() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
    }

    #[test]
    fn test_points_behind_camera_are_not_visible() {
        let camera = Camera::default();
        let vp = camera.view_projection().unwrap();

        assert!(project_world_point(&Point3f::new(0.0, 0.0, 0.0), &vp).is_visible());
        // Camera sits at z = 5 looking down -z
        let behind = project_world_point(&Point3f::new(0.0, 0.0, 8.0), &vp);
        assert!(behind.z > 1.0);
        assert!(!behind.is_visible());
        let past_far = project_world_point(&Point3f::new(0.0, 0.0, -200.0), &vp);
        assert!(!past_far.is_visible());
        let on_camera_plane = project_world_point(&camera.position, &vp);
        assert!(!on_camera_plane.is_visible());
    }

    #[test]
    fn test_right_of_target_projects_right() {
        let camera = Camera::default();
        let vp = camera.view_projection().unwrap();
        let p = project_world_point(&Point3f::new(1.0, 1.0, 0.0), &vp);
        assert!(p.x > 0.0);
        assert!(p.y > 0.0);
        assert!(p.x < 1.0 && p.y < 1.0);
    }
}

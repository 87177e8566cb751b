//! Viewing camera consumed by the selection engine

use crate::error::{Error, Result};
use crate::point::{Point3f, Vector3f};
use nalgebra::{Matrix4, Perspective3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Anything that can report the current view-projection at query time
pub trait CameraSource {
    /// `projection * view`, mapping world space to clip space.
    ///
    /// Fails when the camera cannot produce a projection, e.g. a zero aspect ratio.
    fn view_projection(&self) -> Result<Matrix4<f32>>;

    /// Vertical field of view in radians
    fn fov(&self) -> f32;
}

impl<T: CameraSource + ?Sized> CameraSource for Rc<RefCell<T>> {
    fn view_projection(&self) -> Result<Matrix4<f32>> {
        self.borrow().view_projection()
    }

    fn fov(&self) -> f32 {
        self.borrow().fov()
    }
}

/// A perspective camera looking from `position` at `target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3f,
        target: Point3f,
        up: Vector3f,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Result<Matrix4<f32>> {
        self.validate()?;
        Ok(Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner())
    }

    /// Check that the projection parameters describe a usable frustum
    pub fn validate(&self) -> Result<()> {
        let invalid = |what: String| Err(Error::InvalidCamera(what));

        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > f32::EPSILON) {
            return invalid(format!("aspect ratio must be positive, got {}", self.aspect_ratio));
        }
        if !(self.fov.is_finite() && self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            return invalid(format!("field of view must be in (0, pi), got {}", self.fov));
        }
        if !(self.near.is_finite() && self.far.is_finite() && self.near > 0.0) {
            return invalid(format!(
                "clip planes must be finite with near > 0, got {}..{}",
                self.near, self.far
            ));
        }
        if self.far - self.near <= f32::EPSILON {
            return invalid(format!(
                "far plane must lie beyond near plane, got {}..{}",
                self.near, self.far
            ));
        }
        Ok(())
    }

    /// Keep the projection in step with the render surface after a resize
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }
}

impl CameraSource for Camera {
    fn view_projection(&self) -> Result<Matrix4<f32>> {
        Ok(self.projection_matrix()? * self.view_matrix())
    }

    fn fov(&self) -> f32 {
        self.fov
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3f::new(0.0, 0.0, 5.0),
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

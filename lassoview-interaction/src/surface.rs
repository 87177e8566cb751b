//! Drawing surfaces the tool arbitrates pointer input between

use serde::{Deserialize, Serialize};

/// Position and size of a surface in logical pixels, the unit pointer events use
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
}

/// Anything whose pointer-input reception can be switched on and off
pub trait PointerTarget {
    fn pointer_interactive(&self) -> bool;
    fn set_pointer_interactive(&mut self, interactive: bool);
}

/// The surface the scene is rendered to
pub trait RenderSurface: PointerTarget {
    /// Current bounds, sampled fresh on every call
    fn bounds(&self) -> SurfaceRect;

    fn set_cursor(&mut self, cursor: CursorStyle);
}

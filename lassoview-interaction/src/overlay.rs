//! Cosmetic outline feedback drawn on a surface stacked over the render surface
//!
//! Nothing here influences which objects get selected.

use crate::surface::{PointerTarget, SurfaceRect};
use lassoview_core::ScreenPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    /// Alternating dash and gap lengths; empty draws a solid line
    pub dash: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Outline while the user is still drawing
    pub drawing: StrokeStyle,
    /// Outline of a resolved lasso
    pub resolved: StrokeStyle,
    /// Translucent fill of a resolved lasso
    pub fill: Rgba,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            drawing: StrokeStyle {
                color: Rgba::new(0.0, 0.63, 1.0, 1.0),
                width: 2.0,
                dash: vec![5.0, 5.0],
            },
            resolved: StrokeStyle {
                color: Rgba::new(0.0, 0.63, 1.0, 1.0),
                width: 2.0,
                dash: Vec::new(),
            },
            fill: Rgba::new(0.0, 0.63, 1.0, 0.1),
        }
    }
}

/// 2D drawing surface provided by the host
pub trait OverlayCanvas: PointerTarget {
    /// Place and size the canvas in logical pixels
    fn set_bounds(&mut self, bounds: SurfaceRect);

    /// Backing pixels per logical pixel
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    fn clear(&mut self);

    /// Open polyline in backing pixels
    fn stroke_path(&mut self, points: &[ScreenPoint], stroke: &StrokeStyle);

    /// Closed, filled and outlined polygon in backing pixels
    fn fill_path(&mut self, points: &[ScreenPoint], fill: Rgba, stroke: &StrokeStyle);

    /// Free the canvas; it is not drawn to afterwards
    fn detach(&mut self) {}
}

/// One recorded call on a [`HeadlessCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke(Vec<ScreenPoint>),
    Fill(Vec<ScreenPoint>),
}

/// Canvas that records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    pub interactive: bool,
    pub bounds: SurfaceRect,
    pub pixel_ratio: f32,
    pub commands: Vec<DrawCommand>,
    pub detached: bool,
}

impl Default for HeadlessCanvas {
    fn default() -> Self {
        Self {
            interactive: false,
            bounds: SurfaceRect::default(),
            pixel_ratio: 1.0,
            commands: Vec::new(),
            detached: false,
        }
    }
}

impl PointerTarget for HeadlessCanvas {
    fn pointer_interactive(&self) -> bool {
        self.interactive
    }

    fn set_pointer_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
}

impl OverlayCanvas for HeadlessCanvas {
    fn set_bounds(&mut self, bounds: SurfaceRect) {
        self.bounds = bounds;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_path(&mut self, points: &[ScreenPoint], _stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke(points.to_vec()));
    }

    fn fill_path(&mut self, points: &[ScreenPoint], _fill: Rgba, _stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Fill(points.to_vec()));
    }

    fn detach(&mut self) {
        self.commands.clear();
        self.detached = true;
    }
}

/// Draws lasso outlines onto an [`OverlayCanvas`] kept aligned with the render surface
pub struct OverlayRenderer {
    canvas: Box<dyn OverlayCanvas>,
    style: OverlayStyle,
    bounds: Option<SurfaceRect>,
}

impl OverlayRenderer {
    pub fn new(canvas: Box<dyn OverlayCanvas>, style: OverlayStyle) -> Self {
        Self {
            canvas,
            style,
            bounds: None,
        }
    }

    /// Match the render surface exactly; call on activation and on every resize
    pub fn sync_to(&mut self, render_bounds: SurfaceRect) {
        if self.bounds != Some(render_bounds) {
            tracing::trace!(?render_bounds, "overlay resynchronised");
        }
        self.bounds = Some(render_bounds);
        self.canvas.set_bounds(render_bounds);
    }

    pub fn bounds(&self) -> Option<SurfaceRect> {
        self.bounds
    }

    pub fn canvas(&self) -> &dyn OverlayCanvas {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> &mut dyn OverlayCanvas {
        self.canvas.as_mut()
    }

    /// Dashed open outline of a path still being drawn
    pub fn draw_in_progress(&mut self, path: &[ScreenPoint]) {
        self.canvas.clear();
        if path.len() < 2 {
            return;
        }
        let scaled = self.to_backing(path);
        self.canvas.stroke_path(&scaled, &self.style.drawing);
    }

    /// Filled closed outline of a resolved path
    pub fn draw_resolved(&mut self, path: &[ScreenPoint]) {
        self.canvas.clear();
        if path.len() < 3 {
            return;
        }
        let scaled = self.to_backing(path);
        self.canvas.fill_path(&scaled, self.style.fill, &self.style.resolved);
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    pub fn dispose(&mut self) {
        self.canvas.clear();
        self.canvas.detach();
    }

    /// Logical pointer coordinates to canvas backing pixels
    fn to_backing(&self, path: &[ScreenPoint]) -> Vec<ScreenPoint> {
        let ratio = self.canvas.pixel_ratio();
        path.iter()
            .map(|p| ScreenPoint::new(p.x * ratio, p.y * ratio))
            .collect()
    }
}

impl std::fmt::Debug for OverlayRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayRenderer")
            .field("style", &self.style)
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Shares its state with the test so draw calls stay observable
    #[derive(Clone, Default)]
    struct SharedCanvas(std::rc::Rc<std::cell::RefCell<HeadlessCanvas>>);

    impl PointerTarget for SharedCanvas {
        fn pointer_interactive(&self) -> bool {
            self.0.borrow().interactive
        }
        fn set_pointer_interactive(&mut self, interactive: bool) {
            self.0.borrow_mut().interactive = interactive;
        }
    }

    impl OverlayCanvas for SharedCanvas {
        fn set_bounds(&mut self, bounds: SurfaceRect) {
            self.0.borrow_mut().set_bounds(bounds)
        }
        fn pixel_ratio(&self) -> f32 {
            self.0.borrow().pixel_ratio
        }
        fn clear(&mut self) {
            self.0.borrow_mut().clear()
        }
        fn stroke_path(&mut self, points: &[ScreenPoint], stroke: &StrokeStyle) {
            self.0.borrow_mut().stroke_path(points, stroke)
        }
        fn fill_path(&mut self, points: &[ScreenPoint], fill: Rgba, stroke: &StrokeStyle) {
            self.0.borrow_mut().fill_path(points, fill, stroke)
        }
        fn detach(&mut self) {
            self.0.borrow_mut().detach()
        }
    }

    fn path() -> Vec<ScreenPoint> {
        vec![
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(10.0, 1.0),
            ScreenPoint::new(10.0, 8.0),
        ]
    }

    #[test]
    fn test_in_progress_then_resolved_replaces_drawing() {
        let canvas = SharedCanvas::default();
        let mut overlay = OverlayRenderer::new(Box::new(canvas.clone()), OverlayStyle::default());

        overlay.draw_in_progress(&path());
        assert!(matches!(
            canvas.0.borrow().commands.as_slice(),
            [DrawCommand::Stroke(p)] if p.len() == 3
        ));

        overlay.draw_resolved(&path());
        assert!(matches!(canvas.0.borrow().commands.as_slice(), [DrawCommand::Fill(_)]));

        overlay.clear();
        assert!(canvas.0.borrow().commands.is_empty());
    }

    #[test]
    fn test_paths_are_scaled_to_backing_pixels() {
        let canvas = SharedCanvas::default();
        canvas.0.borrow_mut().pixel_ratio = 2.0;
        let mut overlay = OverlayRenderer::new(Box::new(canvas.clone()), OverlayStyle::default());

        overlay.draw_in_progress(&path());
        match &canvas.0.borrow().commands[0] {
            DrawCommand::Stroke(points) => {
                assert_relative_eq!(points[1].x, 20.0);
                assert_relative_eq!(points[1].y, 2.0);
            }
            other => panic!("unexpected command {:?}", other),
        };
    }

    #[test]
    fn test_sync_and_dispose() {
        let canvas = SharedCanvas::default();
        let mut overlay = OverlayRenderer::new(Box::new(canvas.clone()), OverlayStyle::default());
        let rect = SurfaceRect::new(10.0, 20.0, 640.0, 480.0);

        overlay.sync_to(rect);
        assert_eq!(canvas.0.borrow().bounds, rect);
        assert_eq!(overlay.bounds(), Some(rect));

        overlay.draw_in_progress(&path()[..1]);
        assert!(canvas.0.borrow().commands.is_empty());

        overlay.dispose();
        assert!(canvas.0.borrow().detached);
    }
}

//! Headless lasso demo
//!
//! Builds a small scene (a cube, a light and a camera rig), replays a lasso gesture
//! through the tool with in-memory surfaces and prints the selection as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lassoview_core::logging::{init_logging, LoggingConfig};
use lassoview_core::{
    Camera, MeshGeometry, NodeDesc, NodeId, Point3f, Scene, ScreenPoint, Transform3D,
    UnitQuaternion, Vector3,
};
use lassoview_interaction::{
    CursorStyle, HeadlessCanvas, InputEvent, LassoTool, PointerEvent, PointerTarget, RenderSurface,
    SurfaceRect, ToolConfig,
};
use lassoview_selection::{CollectingDiagnostics, SelectionResult};
use serde::Serialize;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LassoShape {
    /// The whole viewport
    Full,
    /// The left half of the viewport
    Left,
    /// A corner away from every object
    Outside,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tool configuration as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the per-mesh face sampling cap
    #[arg(long)]
    cap: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Which lasso gesture to replay
    #[arg(long, value_enum, default_value_t = LassoShape::Full)]
    lasso: LassoShape,
}

/// Render surface standing in for a window
struct HeadlessSurface {
    interactive: bool,
    bounds: SurfaceRect,
}

impl PointerTarget for HeadlessSurface {
    fn pointer_interactive(&self) -> bool {
        self.interactive
    }

    fn set_pointer_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
}

impl RenderSurface for HeadlessSurface {
    fn bounds(&self) -> SurfaceRect {
        self.bounds
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        tracing::debug!(?cursor, "cursor changed");
    }
}

#[derive(Serialize)]
struct Report<'a> {
    nodes: Vec<(NodeId, &'a str)>,
    selection: &'a SelectionResult,
    diagnostics: Vec<String>,
}

fn cube() -> MeshGeometry {
    let h = 0.5;
    let vertices = vec![
        Point3f::new(-h, -h, -h),
        Point3f::new(h, -h, -h),
        Point3f::new(h, h, -h),
        Point3f::new(-h, h, -h),
        Point3f::new(-h, -h, h),
        Point3f::new(h, -h, h),
        Point3f::new(h, h, h),
        Point3f::new(-h, h, h),
    ];
    let faces = [
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [3, 7, 6], [3, 6, 2],
        [0, 4, 7], [0, 7, 3],
        [1, 2, 6], [1, 6, 5],
    ];
    MeshGeometry::from_vertices_and_faces(vertices, &faces)
}

/// Corners of the gesture in surface pixels
fn corners(shape: LassoShape) -> [(f32, f32); 4] {
    let (x0, y0, x1, y1) = match shape {
        LassoShape::Full => (0.0, 0.0, WIDTH, HEIGHT),
        LassoShape::Left => (0.0, 0.0, WIDTH / 2.0, HEIGHT),
        LassoShape::Outside => (0.0, 0.0, 80.0, 60.0),
    };
    [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

/// Pointer samples along the outline, spaced like a real drag
fn gesture(shape: LassoShape) -> Vec<ScreenPoint> {
    let corners = corners(shape);
    let mut points = Vec::new();
    for (i, &(ax, ay)) in corners.iter().enumerate() {
        let (bx, by) = corners[(i + 1) % corners.len()];
        let steps = ((bx - ax).abs().max((by - ay).abs()) / 10.0).ceil().max(1.0) as usize;
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            points.push(ScreenPoint::new(ax + (bx - ax) * t, ay + (by - ay) * t));
        }
    }
    points
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&LoggingConfig {
        json: args.json_logs,
        ..LoggingConfig::default()
    });

    let mut config = match &args.config {
        Some(path) => ToolConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ToolConfig::default(),
    };
    if let Some(cap) = args.cap {
        config.selection.face_sample_cap = cap;
    }

    let mut scene = Scene::new();
    let cube_id = scene.add(NodeDesc::mesh("cube", cube()));
    let light_id = scene.add(
        NodeDesc::light("key light")
            .with_transform(Transform3D::translation(Vector3::new(-1.5, 0.0, 0.0))),
    );
    // The rig looks back at the cube; only its position matters for selection
    let rig_pose = Transform3D::from_translation_rotation(
        Vector3::new(1.5, 1.0, -1.0),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::PI),
    );
    let rig_id = scene.add(NodeDesc::camera("camera rig").with_transform(rig_pose));
    let names = [(cube_id, "cube"), (light_id, "key light"), (rig_id, "camera rig")];

    let mut camera = Camera::default();
    camera.set_aspect_ratio(WIDTH, HEIGHT);

    let diagnostics = Rc::new(CollectingDiagnostics::new());
    let emitted: Rc<RefCell<Option<SelectionResult>>> = Rc::new(RefCell::new(None));

    let mut tool = LassoTool::builder()
        .config(config)
        .render_surface(HeadlessSurface {
            interactive: true,
            bounds: SurfaceRect::sized(WIDTH, HEIGHT),
        })
        .overlay(HeadlessCanvas::default())
        .camera(camera)
        .scene(scene)
        .diagnostics(diagnostics.clone())
        .build()
        .context("failed to build lasso tool")?;

    let sink = emitted.clone();
    tool.on_selection(move |result| *sink.borrow_mut() = Some(result.clone()));

    tool.activate();
    let points = gesture(args.lasso);
    let (first, rest) = points
        .split_first()
        .context("gesture has no points")?;
    tool.handle_input(InputEvent::PointerDown(PointerEvent::primary(first.x, first.y)));
    for point in rest {
        tool.handle_input(InputEvent::PointerMove(*point));
    }
    tool.handle_input(InputEvent::PointerUp(PointerEvent::primary(first.x, first.y)));
    tool.deactivate();

    let selection = emitted
        .borrow_mut()
        .take()
        .context("the gesture did not produce a selection")?;

    let report = Report {
        nodes: names.to_vec(),
        selection: &selection,
        diagnostics: diagnostics.entries().iter().map(ToString::to_string).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    tool.dispose();
    Ok(())
}

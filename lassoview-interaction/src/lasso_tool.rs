//! Lasso selection tool
//!
//! The tool owns one gesture at a time and moves through
//! `Inactive -> Idle -> Drawing -> Resolving -> Idle`, with [`LassoTool::deactivate`]
//! returning to `Inactive` from anywhere. While it is not inactive, the render surface,
//! competing surfaces and camera navigation are silenced; deactivation restores exactly
//! the pointer-interactivity flags captured by the latest activation.
//!
//! Hosts feed events through [`LassoTool::handle_input`] and call [`LassoTool::tick`]
//! once per frame so the resolved outline can fade out.

use crate::config::ToolConfig;
use crate::input::{
    EventResponse, InputChannel, InputEvent, InputSource, InputSubscription, Key, PointerButton,
    PointerEvent,
};
use crate::markers::{MarkerFactory, MarkerPool};
use crate::navigation::NavigationControl;
use crate::overlay::{OverlayCanvas, OverlayRenderer};
use crate::surface::{CursorStyle, PointerTarget, RenderSurface};
use instant::Instant;
use lassoview_core::{CameraSource, Error, NodeId, Result, SceneAccessor, SceneNode, ScreenPoint};
use lassoview_selection::{
    face_world_centroid, representative_point, ClosedPolygon, Diagnostic, DiagnosticSink,
    SelectionResolver, SelectionResult, TracingDiagnostics, Viewport,
};
use std::collections::HashMap;

/// Where the tool is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    Inactive,
    Idle,
    Drawing,
    Resolving,
}

type SelectionListener = Box<dyn FnMut(&SelectionResult)>;

/// Pointer-interactivity flags captured by `activate`
#[derive(Debug, Clone)]
struct SurfaceSnapshot {
    render: bool,
    overlay: bool,
    competing: Vec<bool>,
}

/// Collects the tool's collaborators; render surface, overlay canvas, camera and
/// scene are required.
#[derive(Default)]
pub struct LassoToolBuilder {
    config: ToolConfig,
    render: Option<Box<dyn RenderSurface>>,
    overlay: Option<Box<dyn OverlayCanvas>>,
    camera: Option<Box<dyn CameraSource>>,
    scene: Option<Box<dyn SceneAccessor>>,
    navigation: Option<Box<dyn NavigationControl>>,
    competing: Vec<Box<dyn PointerTarget>>,
    markers: Option<Box<dyn MarkerFactory>>,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
    input: Option<Box<dyn InputSource>>,
}

impl LassoToolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ToolConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render_surface(mut self, surface: impl RenderSurface + 'static) -> Self {
        self.render = Some(Box::new(surface));
        self
    }

    pub fn overlay(mut self, canvas: impl OverlayCanvas + 'static) -> Self {
        self.overlay = Some(Box::new(canvas));
        self
    }

    pub fn camera(mut self, camera: impl CameraSource + 'static) -> Self {
        self.camera = Some(Box::new(camera));
        self
    }

    pub fn scene(mut self, scene: impl SceneAccessor + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    pub fn navigation(mut self, navigation: impl NavigationControl + 'static) -> Self {
        self.navigation = Some(Box::new(navigation));
        self
    }

    /// Another surface that must stop receiving pointer input while the tool is active
    pub fn competing_surface(mut self, surface: impl PointerTarget + 'static) -> Self {
        self.competing.push(Box::new(surface));
        self
    }

    pub fn marker_factory(mut self, factory: impl MarkerFactory + 'static) -> Self {
        self.markers = Some(Box::new(factory));
        self
    }

    pub fn diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Some(Box::new(sink));
        self
    }

    /// Subscribe to pointer and keyboard input on `source` for the tool's lifetime
    pub fn input_source(mut self, source: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(source));
        self
    }

    pub fn build(self) -> Result<LassoTool> {
        self.config.validate()?;
        let render = self.render.ok_or(Error::MissingCollaborator("render surface"))?;
        let overlay = self.overlay.ok_or(Error::MissingCollaborator("overlay canvas"))?;
        let camera = self.camera.ok_or(Error::MissingCollaborator("camera"))?;
        let scene = self.scene.ok_or(Error::MissingCollaborator("scene accessor"))?;

        let subscriptions = match self.input {
            Some(mut source) => vec![
                source.subscribe(InputChannel::Pointer),
                source.subscribe(InputChannel::Keyboard),
            ],
            None => Vec::new(),
        };

        Ok(LassoTool {
            resolver: SelectionResolver::new(&self.config.selection),
            overlay: OverlayRenderer::new(overlay, self.config.overlay.clone()),
            markers: MarkerPool::new(self.config.marker_capacity),
            marker_factory: self.markers,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Box::new(TracingDiagnostics)),
            config: self.config,
            render,
            camera,
            scene,
            navigation: self.navigation,
            competing: self.competing,
            listeners: Vec::new(),
            subscriptions,
            state: ToolState::Inactive,
            path: Vec::new(),
            snapshot: None,
            last_result: None,
            pending_clear: None,
            disposed: false,
        })
    }
}

/// Freeform screen-space selection over a live scene
pub struct LassoTool {
    config: ToolConfig,
    render: Box<dyn RenderSurface>,
    camera: Box<dyn CameraSource>,
    scene: Box<dyn SceneAccessor>,
    navigation: Option<Box<dyn NavigationControl>>,
    competing: Vec<Box<dyn PointerTarget>>,
    overlay: OverlayRenderer,
    markers: MarkerPool,
    marker_factory: Option<Box<dyn MarkerFactory>>,
    diagnostics: Box<dyn DiagnosticSink>,
    resolver: SelectionResolver,
    listeners: Vec<SelectionListener>,
    subscriptions: Vec<Box<dyn InputSubscription>>,
    state: ToolState,
    path: Vec<ScreenPoint>,
    snapshot: Option<SurfaceSnapshot>,
    last_result: Option<SelectionResult>,
    pending_clear: Option<Instant>,
    disposed: bool,
}

impl LassoTool {
    pub fn builder() -> LassoToolBuilder {
        LassoToolBuilder::new()
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != ToolState::Inactive
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Points recorded for the gesture in progress
    pub fn path(&self) -> &[ScreenPoint] {
        &self.path
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    pub fn markers(&self) -> &MarkerPool {
        &self.markers
    }

    /// Take exclusive pointer control. Does nothing if already active or disposed.
    pub fn activate(&mut self) {
        if self.disposed {
            tracing::warn!("activate called on a disposed lasso tool");
            return;
        }
        if self.is_active() {
            return;
        }

        self.snapshot = Some(SurfaceSnapshot {
            render: self.render.pointer_interactive(),
            overlay: self.overlay.canvas().pointer_interactive(),
            competing: self.competing.iter().map(|s| s.pointer_interactive()).collect(),
        });

        self.render.set_pointer_interactive(false);
        for surface in &mut self.competing {
            surface.set_pointer_interactive(false);
        }
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.suspend();
        }
        self.render.set_cursor(CursorStyle::Crosshair);
        self.overlay.sync_to(self.render.bounds());
        self.overlay.canvas_mut().set_pointer_interactive(true);

        self.state = ToolState::Idle;
        tracing::debug!("lasso tool activated");
    }

    /// Hand pointer control back. Safe to call in any state.
    pub fn deactivate(&mut self) {
        if !self.is_active() {
            return;
        }

        if let Some(snapshot) = self.snapshot.take() {
            self.render.set_pointer_interactive(snapshot.render);
            self.overlay
                .canvas_mut()
                .set_pointer_interactive(snapshot.overlay);
            for (surface, interactive) in self.competing.iter_mut().zip(snapshot.competing) {
                surface.set_pointer_interactive(interactive);
            }
        }
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.resume();
        }
        self.render.set_cursor(CursorStyle::Default);

        if self.state == ToolState::Drawing {
            tracing::debug!(points = self.path.len(), "gesture cancelled by deactivation");
        }
        self.path.clear();
        self.overlay.clear();
        self.pending_clear = None;

        self.state = ToolState::Inactive;
        tracing::debug!("lasso tool deactivated");
    }

    /// Flip activation; returns whether the tool is now active
    pub fn toggle(&mut self) -> bool {
        if self.is_active() {
            self.deactivate();
        } else {
            self.activate();
        }
        self.is_active()
    }

    /// Bind, replace or remove the camera navigation collaborator.
    ///
    /// On an active tool the old collaborator is resumed and the new one suspended.
    pub fn set_navigation(&mut self, navigation: Option<Box<dyn NavigationControl>>) {
        let active = self.is_active();
        if active {
            if let Some(old) = self.navigation.as_mut() {
                old.resume();
            }
        }
        self.navigation = navigation;
        if active {
            if let Some(new) = self.navigation.as_mut() {
                new.suspend();
            }
        }
    }

    /// Register a surface to silence while active. An active tool silences it now and
    /// restores it on deactivation.
    pub fn add_competing_surface(&mut self, mut surface: Box<dyn PointerTarget>) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.competing.push(surface.pointer_interactive());
            surface.set_pointer_interactive(false);
        }
        self.competing.push(surface);
    }

    /// Call `listener` once per completed gesture
    pub fn on_selection(&mut self, listener: impl FnMut(&SelectionResult) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn last_selection(&self) -> Option<&SelectionResult> {
        self.last_result.as_ref()
    }

    /// Objects of the last resolved gesture
    pub fn selected_objects(&self) -> Vec<NodeId> {
        self.last_result
            .as_ref()
            .map(|r| r.objects.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Forget the last result and remove its visual indicators; activation is unchanged
    pub fn clear_selection(&mut self) {
        self.last_result = None;
        self.pending_clear = None;
        self.overlay.clear();
        self.markers.clear();
    }

    /// Per-frame housekeeping: clears the resolved outline once its delay elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.pending_clear {
            if now >= deadline {
                self.pending_clear = None;
                self.overlay.clear();
            }
        }
    }

    /// Keep the overlay aligned with the render surface
    pub fn handle_resize(&mut self) {
        if self.disposed {
            return;
        }
        self.overlay.sync_to(self.render.bounds());
    }

    pub fn handle_input(&mut self, event: InputEvent) -> EventResponse {
        if self.disposed {
            return EventResponse::Ignored;
        }

        match event {
            InputEvent::Resize => {
                self.handle_resize();
                EventResponse::Ignored
            }
            InputEvent::Key(Key::Escape) if self.is_active() => {
                self.deactivate();
                EventResponse::Consumed
            }
            InputEvent::Key(_) => EventResponse::Ignored,
            InputEvent::PointerDown(pointer) => self.pointer_down(pointer),
            InputEvent::PointerMove(position) => self.pointer_move(position),
            InputEvent::PointerUp(pointer) => self.pointer_up(pointer),
        }
    }

    fn pointer_down(&mut self, pointer: PointerEvent) -> EventResponse {
        if self.state != ToolState::Idle || pointer.button != PointerButton::Primary {
            return EventResponse::Ignored;
        }
        self.pending_clear = None;
        self.path.clear();
        self.path.push(pointer.position);
        self.overlay.clear();
        self.state = ToolState::Drawing;
        EventResponse::Consumed
    }

    fn pointer_move(&mut self, position: ScreenPoint) -> EventResponse {
        if self.state != ToolState::Drawing {
            return EventResponse::Ignored;
        }
        let spacing = self.config.min_point_spacing;
        let far_enough = self
            .path
            .last()
            .map_or(true, |last| last.distance_squared(&position) >= spacing * spacing);
        if far_enough {
            self.path.push(position);
            self.overlay.draw_in_progress(&self.path);
        }
        EventResponse::Consumed
    }

    fn pointer_up(&mut self, pointer: PointerEvent) -> EventResponse {
        if self.state != ToolState::Drawing || pointer.button != PointerButton::Primary {
            return EventResponse::Ignored;
        }
        self.state = ToolState::Resolving;
        let path = std::mem::take(&mut self.path);
        self.finish_gesture(&path);
        self.state = ToolState::Idle;
        EventResponse::Consumed
    }

    fn finish_gesture(&mut self, path: &[ScreenPoint]) {
        if path.len() < ClosedPolygon::MIN_POINTS {
            tracing::debug!(points = path.len(), "gesture too short, nothing selected");
            self.overlay.clear();
            return;
        }

        let bounds = self.render.bounds();
        let polygon = match Viewport::new(bounds.width, bounds.height)
            .map(|viewport| ClosedPolygon::from_screen_path(path, &viewport))
        {
            Ok(Some(polygon)) => polygon,
            Ok(None) => {
                self.overlay.clear();
                return;
            }
            Err(err) => return self.cancel_gesture(err),
        };

        let view_projection = match self.camera.view_projection() {
            Ok(view_projection) => view_projection,
            Err(err) => return self.cancel_gesture(err),
        };
        let nodes = self.scene.snapshot();
        let result = self
            .resolver
            .resolve(&nodes, &polygon, &view_projection, self.diagnostics.as_ref());

        if self.config.debug_markers {
            self.place_markers(&nodes, &result);
        }

        tracing::info!(
            objects = result.objects.len(),
            faces = result.face_count(),
            points = path.len(),
            "lasso selection"
        );

        self.overlay.draw_resolved(path);
        self.pending_clear = Some(Instant::now() + self.config.clear_delay());

        for listener in &mut self.listeners {
            listener(&result);
        }
        self.last_result = Some(result);
    }

    /// Drop a gesture that cannot be resolved; nothing is emitted
    fn cancel_gesture(&mut self, err: Error) {
        tracing::warn!("lasso gesture cancelled: {}", err);
        self.diagnostics.report(Diagnostic::gesture(err.to_string()));
        self.overlay.clear();
    }

    fn place_markers(&mut self, nodes: &[SceneNode], result: &SelectionResult) {
        let Some(factory) = self.marker_factory.as_mut() else {
            return;
        };
        let by_id: HashMap<NodeId, &SceneNode> = nodes.iter().map(|n| (n.id, n)).collect();

        for id in &result.objects {
            if let Some(node) = by_id.get(id) {
                self.markers.insert(factory.create(representative_point(node)));
            }
        }
        for face in &result.faces {
            let Some(node) = by_id.get(&face.node) else {
                continue;
            };
            match face_world_centroid(node, face.face) {
                Ok(centroid) => self.markers.insert(factory.create(centroid)),
                Err(err) => tracing::trace!("no marker for face {}: {}", face.face, err),
            }
        }
    }

    /// Release the overlay, markers and input subscriptions. Further calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.deactivate();
        self.clear_selection();
        self.overlay.dispose();
        for subscription in &mut self.subscriptions {
            subscription.cancel();
        }
        self.subscriptions.clear();
        self.listeners.clear();
        self.disposed = true;
        tracing::debug!("lasso tool disposed");
    }
}

impl Drop for LassoTool {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for LassoTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LassoTool")
            .field("state", &self.state)
            .field("path_len", &self.path.len())
            .field("markers", &self.markers)
            .field("disposed", &self.disposed)
            .finish()
    }
}

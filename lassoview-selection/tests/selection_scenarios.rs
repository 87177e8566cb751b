//! Scenario tests for lassoview-selection
//!
//! These run whole resolution passes over small scenes and check the resulting
//! objects and faces.

use lassoview_core::{
    Camera, Error, MeshGeometry, NodeDesc, Point3f, Scene, ScreenPoint, Transform3D, Vector3,
};
use lassoview_selection::*;

const SIZE: f32 = 400.0;

/// Unit cube centered at the origin, 12 triangles
fn unit_cube() -> MeshGeometry {
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
        [0, 2, 1], [0, 3, 2], // back
        [4, 5, 6], [4, 6, 7], // front
        [0, 1, 5], [0, 5, 4], // bottom
        [3, 7, 6], [3, 6, 2], // top
        [0, 4, 7], [0, 7, 3], // left
        [1, 2, 6], [1, 6, 5], // right
    ];
    MeshGeometry::from_vertices_and_faces(vertices, &faces)
}

fn camera() -> Camera {
    let mut camera = Camera::default();
    camera.aspect_ratio = 1.0;
    camera
}

fn rect_lasso(x0: f32, y0: f32, x1: f32, y1: f32) -> ClosedPolygon {
    let viewport = Viewport::new(SIZE, SIZE).unwrap();
    ClosedPolygon::from_screen_path(
        &[
            ScreenPoint::new(x0, y0),
            ScreenPoint::new(x1, y0),
            ScreenPoint::new(x1, y1),
            ScreenPoint::new(x0, y1),
        ],
        &viewport,
    )
    .unwrap()
}

fn full_lasso() -> ClosedPolygon {
    rect_lasso(0.0, 0.0, SIZE, SIZE)
}

fn translated(x: f32, y: f32, z: f32) -> Transform3D {
    Transform3D::translation(Vector3::new(x, y, z))
}

fn resolve(
    scene: &Scene,
    lasso: &ClosedPolygon,
    diagnostics: &CollectingDiagnostics,
) -> SelectionResult {
    SelectionResolver::default()
        .resolve_scene(scene, &camera(), lasso, diagnostics)
        .unwrap()
}

#[test]
fn test_full_viewport_lasso_selects_whole_cube() {
    let mut scene = Scene::new();
    let cube = scene.add(NodeDesc::mesh("cube", unit_cube()));
    let diagnostics = CollectingDiagnostics::new();

    let result = resolve(&scene, &full_lasso(), &diagnostics);

    assert_eq!(result.faces_of(cube).collect::<Vec<_>>(), (0..12).collect::<Vec<_>>());
    assert!(result.contains_object(cube));
    assert_eq!(result.objects.len(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_lasso_outside_footprint_selects_nothing() {
    let mut scene = Scene::new();
    let cube = scene.add(NodeDesc::mesh("cube", unit_cube()));

    // Top-left corner of the viewport, far from the centered cube
    let corner = rect_lasso(0.0, 0.0, 60.0, 60.0);
    let result = resolve(&scene, &corner, &CollectingDiagnostics::new());

    assert!(result.faces.is_empty());
    assert!(!result.contains_object(cube));
    assert!(result.is_empty());
}

#[test]
fn test_partial_lasso_selects_only_covered_faces() {
    let mut scene = Scene::new();
    let left = scene.add(
        NodeDesc::mesh("left", unit_cube()).with_transform(translated(-1.2, 0.0, 0.0)),
    );
    let right = scene.add(
        NodeDesc::mesh("right", unit_cube()).with_transform(translated(1.2, 0.0, 0.0)),
    );
    let left_half = rect_lasso(0.0, 0.0, SIZE / 2.0, SIZE);

    let result = resolve(&scene, &left_half, &CollectingDiagnostics::new());

    assert!(result.contains_object(left));
    assert!(!result.contains_object(right));
    assert_eq!(result.faces_of(left).count(), 12);
    assert_eq!(result.faces_of(right).count(), 0);
}

#[test]
fn test_non_mesh_nodes_use_candidacy() {
    let mut scene = Scene::new();
    let light = scene.add(NodeDesc::light("key").with_transform(translated(-1.0, 0.0, 0.0)));
    let cam = scene.add(NodeDesc::camera("aux").with_transform(translated(1.0, 0.0, 0.0)));
    let hidden = scene.add(
        NodeDesc::light("off")
            .with_transform(translated(-1.0, 0.5, 0.0))
            .with_visible(false),
    );

    let left_half = rect_lasso(0.0, 0.0, SIZE / 2.0, SIZE);
    let result = resolve(&scene, &left_half, &CollectingDiagnostics::new());

    assert!(result.contains_object(light));
    assert!(!result.contains_object(cam));
    assert!(!result.contains_object(hidden));
    assert!(result.faces.is_empty());
}

/// Two far-apart slivers whose bounds are centered at the origin
fn split_mesh() -> MeshGeometry {
    MeshGeometry::from_triangle_soup(vec![
        Point3f::new(-2.0, -0.1, 0.0),
        Point3f::new(-1.8, -0.1, 0.0),
        Point3f::new(-1.9, 0.1, 0.0),
        Point3f::new(1.8, -0.1, 0.0),
        Point3f::new(2.0, -0.1, 0.0),
        Point3f::new(1.9, 0.1, 0.0),
    ])
}

#[test]
fn test_fallback_selects_enclosed_mesh_when_no_faces_hit() {
    let mut scene = Scene::new();
    let mesh = scene.add(NodeDesc::mesh("split", split_mesh()));
    let center = rect_lasso(SIZE * 0.4, SIZE * 0.4, SIZE * 0.6, SIZE * 0.6);

    let result = resolve(&scene, &center, &CollectingDiagnostics::new());

    assert!(result.faces.is_empty());
    assert!(result.contains_object(mesh));
}

#[test]
fn test_fallback_is_skipped_once_any_face_is_hit() {
    let mut scene = Scene::new();
    let split = scene.add(NodeDesc::mesh("split", split_mesh()));
    let small = scene.add(
        NodeDesc::mesh("small", unit_cube()).with_transform(Transform3D::uniform_scaling(0.2)),
    );
    let center = rect_lasso(SIZE * 0.4, SIZE * 0.4, SIZE * 0.6, SIZE * 0.6);

    let result = resolve(&scene, &center, &CollectingDiagnostics::new());

    assert!(result.contains_object(small));
    assert!(!result.contains_object(split));
    assert!(result.faces_of(small).count() > 0);
}

#[test]
fn test_broken_mesh_does_not_abort_resolution() {
    let mut scene = Scene::new();
    let broken_geometry = MeshGeometry::new(vec![Point3f::origin()], Some(vec![0, 3, 8]));
    let broken = scene.add(NodeDesc::mesh("broken", broken_geometry));
    let empty = scene.add(NodeDesc::mesh("empty", MeshGeometry::from_triangle_soup(Vec::new())));
    let cube = scene.add(NodeDesc::mesh("cube", unit_cube()));
    let diagnostics = CollectingDiagnostics::new();

    let result = resolve(&scene, &full_lasso(), &diagnostics);

    assert_eq!(result.faces_of(cube).count(), 12);
    assert!(!result.contains_object(broken));
    assert!(!result.contains_object(empty));
    let nodes: Vec<_> = diagnostics.entries().iter().filter_map(|d| d.node).collect();
    assert!(nodes.contains(&broken));
    assert!(nodes.contains(&empty));
}

#[test]
fn test_degenerate_camera_fails_before_any_node() {
    let mut scene = Scene::new();
    scene.add(NodeDesc::mesh("cube", unit_cube()));
    let diagnostics = CollectingDiagnostics::new();

    let mut flat = camera();
    flat.aspect_ratio = 0.0;
    let result =
        SelectionResolver::default().resolve_scene(&scene, &flat, &full_lasso(), &diagnostics);
    assert!(matches!(result, Err(Error::InvalidCamera(_))));

    let mut collapsed = camera();
    collapsed.far = collapsed.near;
    let result =
        SelectionResolver::default().resolve_scene(&scene, &collapsed, &full_lasso(), &diagnostics);
    assert!(matches!(result, Err(Error::InvalidCamera(_))));

    assert!(diagnostics.is_empty());
}

#[test]
fn test_faces_always_belong_to_listed_objects() {
    let mut scene = Scene::new();
    for i in 0..5 {
        let transform = translated(i as f32 - 2.0, 0.0, -1.0);
        scene.add(NodeDesc::mesh(format!("cube{}", i), unit_cube()).with_transform(transform));
    }
    scene.add(NodeDesc::light("sun"));

    let lassos = [
        full_lasso(),
        rect_lasso(0.0, 0.0, SIZE / 2.0, SIZE),
        rect_lasso(150.0, 150.0, 250.0, 250.0),
    ];
    for lasso in lassos {
        let result = resolve(&scene, &lasso, &CollectingDiagnostics::new());
        assert!(result.faces.iter().all(|f| result.objects.contains(&f.node)));
    }
}

#[test]
fn test_dense_mesh_is_sampled() {
    // 20 000 tiny triangles spread over the visible area
    let mut positions = Vec::new();
    for i in 0..20_000 {
        let x = (i % 200) as f32 / 100.0 - 1.0;
        let y = (i / 200) as f32 / 50.0 - 1.0;
        positions.push(Point3f::new(x, y, 0.0));
        positions.push(Point3f::new(x + 0.005, y, 0.0));
        positions.push(Point3f::new(x, y + 0.005, 0.0));
    }
    let mut scene = Scene::new();
    let mesh = scene.add(NodeDesc::mesh("dense", MeshGeometry::from_triangle_soup(positions)));
    let resolver = SelectionResolver::new(&SelectionConfig { face_sample_cap: 10_000 });

    let result = resolver
        .resolve_scene(&scene, &camera(), &full_lasso(), &CollectingDiagnostics::new())
        .unwrap();

    let faces: Vec<_> = result.faces_of(mesh).collect();
    assert_eq!(faces.len(), 10_000);
    assert!(faces.iter().all(|f| f % 2 == 0));
}

//! Benchmarks for face selection on dense meshes, with and without the sampling cap

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lassoview_core::{
    Camera, CameraSource, MeshGeometry, NodeDesc, Point3f, Scene, SceneAccessor, ScreenPoint,
};
use lassoview_selection::{ClosedPolygon, CollectingDiagnostics, FaceSelector, Viewport};

fn generate_grid_mesh(size: usize) -> MeshGeometry {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32;
            let fy = y as f32 / (size - 1) as f32;
            vertices.push(Point3f::new(
                fx * 2.0 - 1.0,
                fy * 2.0 - 1.0,
                (fx * std::f32::consts::PI).sin() * (fy * std::f32::consts::PI).sin() * 0.2,
            ));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    MeshGeometry::from_vertices_and_faces(vertices, &faces)
}

/// A 64-point circular lasso over the middle of an 800x800 viewport
fn circle_lasso() -> ClosedPolygon {
    let viewport = Viewport::new(800.0, 800.0).unwrap();
    let path: Vec<ScreenPoint> = (0..64)
        .map(|i| {
            let a = i as f32 / 64.0 * std::f32::consts::TAU;
            ScreenPoint::new(400.0 + 150.0 * a.cos(), 400.0 + 150.0 * a.sin())
        })
        .collect();
    ClosedPolygon::from_screen_path(&path, &viewport).unwrap()
}

fn bench_face_selection(c: &mut Criterion) {
    let sizes = [50, 150, 400];
    let caps = [1_000, 10_000, usize::MAX];

    let mut camera = Camera::default();
    camera.aspect_ratio = 1.0;
    let view_projection = camera.view_projection().unwrap();
    let polygon = circle_lasso();
    let diagnostics = CollectingDiagnostics::new();

    let mut group = c.benchmark_group("face_selection");

    for &size in &sizes {
        let mut scene = Scene::new();
        scene.add(NodeDesc::mesh("grid", generate_grid_mesh(size)));
        let node = scene.snapshot().remove(0);
        let face_count = node.geometry.as_ref().map_or(0, |g| g.triangle_count());

        for &cap in &caps {
            let selector = FaceSelector::with_cap(cap);
            let label = if cap == usize::MAX {
                "uncapped".to_string()
            } else {
                format!("cap{}", cap)
            };
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}f", face_count)),
                &node,
                |b, node| {
                    b.iter(|| {
                        black_box(selector.select_faces(
                            black_box(node),
                            &polygon,
                            &view_projection,
                            &diagnostics,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_face_selection);
criterion_main!(benches);

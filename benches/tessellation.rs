use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use earth_viewer::scene::Geometry;
use earth_viewer::{SceneComposer, TextureLoader, Variant, Viewport};

fn bench_sphere_tessellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_tessellation");

    for segments in [16u32, 32, 64, 128] {
        let geometry = Geometry::sphere(1.0, segments, segments);
        group.bench_with_input(BenchmarkId::from_parameter(segments), &geometry, |b, geometry| {
            b.iter(|| black_box(geometry.tessellate()));
        });
    }

    group.finish();
}

fn bench_cuboid_tessellation(c: &mut Criterion) {
    let geometry = Geometry::cuboid(1.0, 1.0, 1.0);
    c.bench_function("cuboid_tessellation", |b| {
        b.iter(|| black_box(geometry.tessellate()));
    });
}

/// Per-frame CPU work with no GPU attached
fn bench_composer_frame(c: &mut Criterion) {
    let loader = TextureLoader::new("/nonexistent/earth-viewer/textures");
    let mut composer = SceneComposer::initialize(Viewport::new(800, 600), Variant::Full, &loader);

    c.bench_function("composer_begin_frame", |b| {
        b.iter(|| black_box(composer.begin_frame()));
    });

    println!("Frames run: {}", composer.frames_rendered());
}

criterion_group!(
    benches,
    bench_sphere_tessellation,
    bench_cuboid_tessellation,
    bench_composer_frame,
);

criterion_main!(benches);

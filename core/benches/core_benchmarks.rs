use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use meshpack_core::math::Vec3;
use meshpack_core::mesh::generators::{generate_cube, generate_quad, generate_sphere};
use meshpack_core::mesh::{
    ColorFormat, MeshPacker, PackOptions, SimpleMesh, SourceMesh, SourceVertex,
    VertexAttributeFormat, VertexAttributeSemantic, VertexLayout, WindingOrder, pack_mesh,
};

/// Sphere with per-vertex colors added, so every attribute is packed.
fn colored_sphere(segments: u32, rings: u32) -> SimpleMesh {
    let sphere = generate_sphere(1.0, segments, rings);
    let mut mesh = SimpleMesh::new();
    for i in 0..sphere.vertex_count() {
        let vertex = sphere.vertex(i);
        let color = (vertex.position + Vec3::new(1.0, 1.0, 1.0)) * 0.5;
        mesh.push_vertex(SourceVertex { color: Some(color), ..vertex });
    }
    mesh.with_indices(sphere.triangle_indices().to_vec())
}

// ---------------------------------------------------------------------------
// Mesh generation
// ---------------------------------------------------------------------------

fn bench_generate_sphere(c: &mut Criterion) {
    c.bench_function("generate_sphere_64x32", |b| {
        b.iter(|| generate_sphere(black_box(1.0), black_box(64), black_box(32)));
    });
}

fn bench_generate_quad(c: &mut Criterion) {
    c.bench_function("generate_quad", |b| {
        b.iter(|| generate_quad(black_box(0.5), black_box(0.5)));
    });
}

// ---------------------------------------------------------------------------
// Vertex layout construction
// ---------------------------------------------------------------------------

fn bench_vertex_layout_for_attributes(c: &mut Criterion) {
    c.bench_function("vertex_layout_for_attributes", |b| {
        b.iter(|| {
            black_box(VertexLayout::for_attributes(
                black_box(true),
                black_box(true),
                black_box(true),
                ColorFormat::Unorm8x4,
            ))
        });
    });
}

fn bench_vertex_layout_custom(c: &mut Criterion) {
    c.bench_function("vertex_layout_custom_build", |b| {
        b.iter(|| {
            black_box(
                VertexLayout::new()
                    .with_attribute(
                        VertexAttributeSemantic::Position,
                        VertexAttributeFormat::Float3,
                    )
                    .with_attribute(
                        VertexAttributeSemantic::Normal,
                        VertexAttributeFormat::Float3,
                    )
                    .with_attribute(
                        VertexAttributeSemantic::Color,
                        VertexAttributeFormat::Float4,
                    ),
            )
        });
    });
}

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

fn bench_pack_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_sphere");
    for (segments, rings) in [(16, 8), (64, 32), (128, 64)] {
        let mesh = colored_sphere(segments, rings);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{segments}x{rings}")),
            &mesh,
            |b, mesh| {
                b.iter(|| pack_mesh(Some(black_box(mesh)), Vec3::zeros(), 1.0));
            },
        );
    }
    group.finish();
}

fn bench_pack_float_colors(c: &mut Criterion) {
    let mesh = colored_sphere(64, 32);
    let packer = MeshPacker::new(PackOptions::new().with_color_format(ColorFormat::Float4));
    c.bench_function("pack_sphere_64x32_float_colors", |b| {
        b.iter(|| packer.pack(Some(black_box(&mesh))));
    });
}

fn bench_pack_cube(c: &mut Criterion) {
    let mesh = generate_cube(1.0);
    c.bench_function("pack_cube", |b| {
        b.iter(|| pack_mesh(Some(black_box(&mesh)), Vec3::new(0.5, 0.5, 0.5), 2.0));
    });
}

fn bench_winding_order(c: &mut Criterion) {
    let indices = generate_sphere(1.0, 128, 64).triangle_indices().to_vec();
    let mut group = c.benchmark_group("winding_order");
    for winding in [WindingOrder::ReverseAll, WindingOrder::ReverseEachTriangle] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{winding:?}")),
            &indices,
            |b, indices| {
                b.iter(|| winding.apply(black_box(indices)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_sphere,
    bench_generate_quad,
    bench_vertex_layout_for_attributes,
    bench_vertex_layout_custom,
    bench_pack_sphere,
    bench_pack_float_colors,
    bench_pack_cube,
    bench_winding_order,
);
criterion_main!(benches);

//! Mesh generators for common shapes.
//!
//! These generators produce [`SimpleMesh`] values, mostly as fixtures for
//! tests and benchmarks of the packer.

use std::f32::consts::PI;

use crate::math::{Vec2, Vec3};

use super::source::SimpleMesh;

/// Generate an axis-aligned cube with 8 shared corner vertices.
///
/// Corners sit at `±half_extent` on every axis. The mesh has positions only
/// and 12 counter-clockwise (outward-facing) triangles.
pub fn generate_cube(half_extent: f32) -> SimpleMesh {
    let h = half_extent;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];

    #[rustfmt::skip]
    let triangles = [
        [0, 3, 2], [0, 2, 1], // -Z
        [4, 5, 6], [4, 6, 7], // +Z
        [0, 4, 7], [0, 7, 3], // -X
        [1, 2, 6], [1, 6, 5], // +X
        [0, 1, 5], [0, 5, 4], // -Y
        [3, 7, 6], [3, 6, 2], // +Y
    ];

    SimpleMesh::new()
        .with_positions(positions)
        .with_triangles(&triangles)
}

/// Generate a quad mesh on the XY plane.
///
/// Creates a quad centered at the origin with the given half-width and
/// half-height, facing +Z, with normals and texture coordinates.
///
/// UV coordinates go from (0,0) at top-left to (1,1) at bottom-right.
pub fn generate_quad(half_width: f32, half_height: f32) -> SimpleMesh {
    let positions = vec![
        Vec3::new(-half_width, -half_height, 0.0),
        Vec3::new(half_width, -half_height, 0.0),
        Vec3::new(half_width, half_height, 0.0),
        Vec3::new(-half_width, half_height, 0.0),
    ];
    let uvs = vec![
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];

    SimpleMesh::new()
        .with_positions(positions)
        .with_normals(vec![Vec3::z(); 4])
        .with_uvs(uvs)
        .with_triangles(&[[0, 1, 2], [2, 3, 0]])
}

/// Generate a UV sphere mesh.
///
/// Creates a sphere with the given radius, number of longitudinal segments,
/// and number of latitudinal rings, with normals and texture coordinates.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> SimpleMesh {
    let vertex_count = ((rings + 1) * (segments + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let normal = Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin());

            positions.push(normal * radius);
            normals.push(normal);
            uvs.push(Vec2::new(
                segment as f32 / segments as f32,
                ring as f32 / rings as f32,
            ));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    SimpleMesh::new()
        .with_positions(positions)
        .with_normals(normals)
        .with_uvs(uvs)
        .with_indices(indices)
}

//! Math type aliases and helper functions.
//!
//! All packing math is done in `f32`, matching the precision of the
//! vertex attributes written to GPU buffers.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Apply the packing transform: translate by `offset`, then scale uniformly.
#[inline]
pub fn offset_then_scale(position: &Vec3, offset: &Vec3, scale: f32) -> Vec3 {
    (position + offset) * scale
}

/// Approximate vector equality within `epsilon` per component.
pub fn vec3_approx_eq(a: &Vec3, b: &Vec3, epsilon: f32) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon && (a.z - b.z).abs() <= epsilon
}

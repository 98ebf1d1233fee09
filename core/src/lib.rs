//! # MeshPack Core
//!
//! Converts abstract triangle meshes into GPU-ready data: one interleaved
//! vertex buffer with a layout computed from the attributes the mesh carries,
//! a 32-bit index list, an axis-aligned bounding box and a bounding sphere.
//!
//! ```ignore
//! use meshpack_core::math::Vec3;
//! use meshpack_core::mesh::{SimpleMesh, pack_mesh};
//!
//! let packed = pack_mesh(Some(&mesh), Vec3::zeros(), 1.0).expect("mesh is empty");
//! let descriptor = packed.to_descriptor();
//! ```

pub mod bounds;
pub mod color;
pub mod error;
pub mod math;
pub mod mesh;
pub mod profiling;

pub use error::PackError;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

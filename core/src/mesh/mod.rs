//! Mesh types, source mesh access and packing.
//!
//! This module provides:
//!
//! - [`SourceMesh`] - Read-only accessor over an abstract triangle mesh
//! - [`VertexLayout`] - Interleaved vertex layout built from attribute flags
//! - [`MeshPacker`] - Packs a source mesh into a [`PackedMesh`]
//! - [`PackedMesh`] / [`MeshDescriptor`] - Packed buffers and their draw description
//! - Generators for common shapes (cube, quad, sphere)

mod data;
pub mod generators;
mod layout;
mod packer;
mod source;

pub use data::{MeshDescriptor, PackedMesh, PackedMeshParts};
pub use layout::{
    ColorFormat, VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout,
};
pub use packer::{MeshPacker, PackOptions, WindingOrder, pack_mesh, validate_indices};
pub use source::{SimpleMesh, SourceMesh, SourceVertex, SparseMesh};

//! Packed mesh data structures.
//!
//! This module provides:
//! - [`MeshDescriptor`] - What a rendering engine needs to create buffers and a draw call
//! - [`PackedMesh`] - Interleaved vertex bytes, indices, layout and bounds
//!
//! Packed meshes are always indexed triangle lists with 32-bit indices.

use std::sync::Arc;

use crate::bounds::{BoundingBox, BoundingSphere};
use crate::math::Vec3;

use super::layout::{VertexAttributeSemantic, VertexLayout};

/// Description of the GPU resources and draw call for a packed mesh.
///
/// A rendering engine integration creates one vertex buffer of
/// [`vertex_buffer_size`](Self::vertex_buffer_size) bytes with the given
/// layout, one index buffer, and issues an indexed draw of
/// [`draw_count`](Self::draw_count) indices.
///
/// # Example
///
/// ```ignore
/// let desc = packed.to_descriptor();
/// let vb = device.create_vertex_buffer(desc.vertex_buffer_size(), &desc.layout)?;
/// let ib = device.create_index_buffer(desc.index_buffer_size())?;
/// ```
#[derive(Debug, Clone)]
pub struct MeshDescriptor {
    /// Vertex layout (shared via Arc).
    pub layout: Arc<VertexLayout>,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Number of 32-bit indices.
    pub index_count: u32,
    /// Number of indices to draw.
    pub draw_count: u32,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MeshDescriptor {
    /// Create a new triangle-list descriptor with the given layout.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        Self {
            layout,
            vertex_count: 0,
            index_count: 0,
            draw_count: 0,
            label: None,
        }
    }

    /// Set the vertex count.
    pub fn with_vertex_count(mut self, count: u32) -> Self {
        self.vertex_count = count;
        self
    }

    /// Set the index count. The draw count follows the index count.
    pub fn with_indices(mut self, count: u32) -> Self {
        self.index_count = count;
        self.draw_count = count;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Required vertex buffer size in bytes.
    pub fn vertex_buffer_size(&self) -> u64 {
        self.vertex_count as u64 * self.layout.stride() as u64
    }

    /// Required index buffer size in bytes.
    pub fn index_buffer_size(&self) -> u64 {
        self.index_count as u64 * std::mem::size_of::<u32>() as u64
    }

    /// Number of triangles drawn.
    pub fn triangle_count(&self) -> u32 {
        self.draw_count / 3
    }
}

/// A mesh packed into one interleaved vertex buffer and a 32-bit index list.
///
/// Produced by [`MeshPacker`](super::MeshPacker). All data is owned and
/// immutable; use [`into_parts`](Self::into_parts) to take the buffers.
#[derive(Clone)]
pub struct PackedMesh {
    layout: Arc<VertexLayout>,
    vertex_data: Vec<u8>,
    vertex_count: u32,
    indices: Vec<u32>,
    bounding_box: BoundingBox,
    bounding_sphere: BoundingSphere,
    label: Option<String>,
}

/// Owned buffers of a [`PackedMesh`].
#[derive(Debug)]
pub struct PackedMeshParts {
    pub layout: Arc<VertexLayout>,
    pub vertex_data: Vec<u8>,
    pub indices: Vec<u32>,
    pub bounding_box: BoundingBox,
    pub bounding_sphere: BoundingSphere,
}

impl PackedMesh {
    pub(crate) fn new(
        layout: Arc<VertexLayout>,
        vertex_data: Vec<u8>,
        vertex_count: u32,
        indices: Vec<u32>,
        bounding_box: BoundingBox,
        bounding_sphere: BoundingSphere,
        label: Option<String>,
    ) -> Self {
        debug_assert!(u32::try_from(indices.len()).is_ok());
        debug_assert_eq!(
            vertex_data.len(),
            vertex_count as usize * layout.stride() as usize,
            "Vertex data length must equal vertex count times stride"
        );
        Self {
            layout,
            vertex_data,
            vertex_count,
            indices,
            bounding_box,
            bounding_sphere,
            label,
        }
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the interleaved vertex bytes.
    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the vertex stride in bytes.
    pub fn stride(&self) -> u32 {
        self.layout.stride()
    }

    /// Get the indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the indices as raw little-endian bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        // The packer rejects index lists longer than `u32::MAX`.
        self.indices.len() as u32
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }

    /// Get the axis-aligned bounding box of the packed positions.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Get the bounding sphere of the packed positions.
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Bytes of vertex `index`, or `None` past the last vertex.
    pub fn vertex_bytes(&self, index: usize) -> Option<&[u8]> {
        let stride = self.stride() as usize;
        let start = index.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        self.vertex_data.get(start..end)
    }

    /// Read back the packed position of vertex `index`.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let [x, y, z] = self.read_f32s::<3>(index, VertexAttributeSemantic::Position)?;
        Some(Vec3::new(x, y, z))
    }

    /// Read back `N` float components of an attribute of vertex `index`.
    ///
    /// Returns `None` if the vertex or attribute is missing, or the attribute
    /// holds fewer than `N` floats.
    pub fn read_f32s<const N: usize>(
        &self,
        index: usize,
        semantic: VertexAttributeSemantic,
    ) -> Option<[f32; N]> {
        let attr = self.layout.attribute(semantic)?;
        let bytes = self.vertex_bytes(index)?.get(attr.byte_range())?;
        let mut out = [0.0f32; N];
        for (i, value) in out.iter_mut().enumerate() {
            let chunk = bytes.get(i * 4..i * 4 + 4)?;
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Some(out)
    }

    /// Create a [`MeshDescriptor`] matching this mesh.
    pub fn to_descriptor(&self) -> MeshDescriptor {
        let mut desc = MeshDescriptor::new(self.layout.clone())
            .with_vertex_count(self.vertex_count)
            .with_indices(self.index_count());
        if let Some(label) = &self.label {
            desc = desc.with_label(label.clone());
        }
        desc
    }

    /// Take ownership of the packed buffers.
    pub fn into_parts(self) -> PackedMeshParts {
        PackedMeshParts {
            layout: self.layout,
            vertex_data: self.vertex_data,
            indices: self.indices,
            bounding_box: self.bounding_box,
            bounding_sphere: self.bounding_sphere,
        }
    }
}

impl std::fmt::Debug for PackedMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedMesh")
            .field("label", &self.label)
            .field("vertex_count", &self.vertex_count)
            .field("stride", &self.layout.stride())
            .field("index_count", &self.indices.len())
            .field("bounding_box", &self.bounding_box)
            .field("bounding_sphere", &self.bounding_sphere)
            .field("layout", &self.layout.label)
            .finish()
    }
}

static_assertions::assert_impl_all!(PackedMesh: Send, Sync);

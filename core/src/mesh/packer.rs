//! Packing source meshes into interleaved vertex and index buffers.
//!
//! [`MeshPacker`] takes any [`SourceMesh`] and produces a [`PackedMesh`]:
//!
//! 1. A [`VertexLayout`] is built from the mesh's attribute flags.
//! 2. Every vertex is transformed (`(position + offset) * scale`), merged into
//!    the bounding box, and written into its slot of the vertex buffer.
//! 3. The bounding sphere is fit over the positions read back from the packed
//!    buffer, so it matches exactly what was written.
//! 4. The triangle index list is reordered for the target winding convention.
//!
//! An absent or empty mesh produces `None`: there is nothing to draw.
//!
//! # Example
//!
//! ```ignore
//! let packer = MeshPacker::new(
//!     PackOptions::new()
//!         .with_offset(Vec3::new(0.0, -1.0, 0.0))
//!         .with_scale(0.01)
//!         .with_label("terrain"),
//! );
//! if let Some(packed) = packer.pack(Some(&mesh)) {
//!     let desc = packed.to_descriptor();
//!     // upload packed.vertex_data() / packed.index_bytes() ...
//! }
//! ```

use std::sync::Arc;

use crate::bounds::{BoundingBox, BoundingSphere};
use crate::color::{Color, rgb_to_rgba_f32};
use crate::error::PackError;
use crate::math::{Vec3, offset_then_scale};
use crate::{profile_function, profile_plot, profile_scope};

use super::data::PackedMesh;
use super::layout::{
    ColorFormat, VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexLayout,
};
use super::source::{SourceMesh, SourceVertex, SparseMesh};

/// How the triangle index list is reordered when packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindingOrder {
    /// Reverse the whole flattened index list: output `k` is input `N - 1 - k`.
    ///
    /// Every triangle's winding is flipped and triangles come out in reverse
    /// order.
    #[default]
    ReverseAll,
    /// Reverse each triangle in place: `(a, b, c)` becomes `(c, b, a)`.
    ReverseEachTriangle,
    /// Keep the source order.
    Preserve,
}

impl WindingOrder {
    /// Produce the reordered index list.
    pub fn apply(&self, indices: &[u32]) -> Vec<u32> {
        match self {
            Self::ReverseAll => indices.iter().rev().copied().collect(),
            Self::ReverseEachTriangle => {
                let mut out = Vec::with_capacity(indices.len());
                let mut triangles = indices.chunks_exact(3);
                for t in &mut triangles {
                    out.extend_from_slice(&[t[2], t[1], t[0]]);
                }
                // A trailing partial triangle is kept as-is.
                out.extend_from_slice(triangles.remainder());
                out
            }
            Self::Preserve => indices.to_vec(),
        }
    }
}

/// Options controlling how a mesh is packed.
#[derive(Debug, Clone, PartialEq)]
pub struct PackOptions {
    /// Translation applied to every position before scaling.
    pub offset: Vec3,
    /// Uniform scale applied after the translation.
    pub scale: f32,
    /// Storage format for vertex colors.
    pub color_format: ColorFormat,
    /// Index reordering for the target winding convention.
    pub winding: WindingOrder,
    /// Optional label attached to the packed mesh.
    pub label: Option<String>,
}

impl PackOptions {
    /// Default options: no offset, unit scale, RGBA8 colors, whole-list reversal.
    pub fn new() -> Self {
        Self {
            offset: Vec3::zeros(),
            scale: 1.0,
            color_format: ColorFormat::Unorm8x4,
            winding: WindingOrder::ReverseAll,
            label: None,
        }
    }

    /// Set the position offset.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set the uniform scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the color storage format.
    pub fn with_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = color_format;
        self
    }

    /// Set the index reordering.
    pub fn with_winding(mut self, winding: WindingOrder) -> Self {
        self.winding = winding;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Packs source meshes into [`PackedMesh`] values.
///
/// The packer holds no state besides its options and can be shared between
/// threads; each call reads its mesh and returns freshly allocated buffers.
#[derive(Debug, Clone, Default)]
pub struct MeshPacker {
    options: PackOptions,
}

impl MeshPacker {
    /// Create a packer with the given options.
    pub fn new(options: PackOptions) -> Self {
        Self { options }
    }

    /// Get the packing options.
    pub fn options(&self) -> &PackOptions {
        &self.options
    }

    /// Pack a mesh.
    ///
    /// Returns `None` if `mesh` is absent or has no vertices. The mesh's
    /// attribute data and indices are trusted; use [`try_pack`](Self::try_pack)
    /// to validate the index list first.
    pub fn pack<M: SourceMesh + ?Sized>(&self, mesh: Option<&M>) -> Option<PackedMesh> {
        profile_function!();

        let Some(mesh) = mesh else {
            log::debug!("No mesh to pack");
            return None;
        };
        if mesh.is_empty() {
            log::debug!("Mesh has no vertices, nothing to pack");
            return None;
        }
        let vertex_count =
            match check_counts(mesh.vertex_count(), mesh.triangle_indices().len()) {
                Ok(count) => count,
                Err(err) => {
                    log::warn!("Cannot pack mesh: {err}");
                    return None;
                }
            };

        Some(self.pack_non_empty(mesh, vertex_count))
    }

    /// Pack a mesh after validating its index list.
    ///
    /// Like [`pack`](Self::pack), an absent or empty mesh yields `Ok(None)`.
    pub fn try_pack<M: SourceMesh + ?Sized>(
        &self,
        mesh: Option<&M>,
    ) -> Result<Option<PackedMesh>, PackError> {
        let Some(mesh) = mesh else {
            return Ok(None);
        };
        if mesh.is_empty() {
            return Ok(None);
        }
        let vertex_count = check_counts(mesh.vertex_count(), mesh.triangle_indices().len())?;
        validate_indices(mesh.triangle_indices(), mesh.vertex_count())?;

        Ok(Some(self.pack_non_empty(mesh, vertex_count)))
    }

    /// Compact a sparse mesh and pack the result.
    pub fn pack_sparse(&self, mesh: Option<&SparseMesh>) -> Option<PackedMesh> {
        let compacted = mesh.map(SparseMesh::compact);
        self.pack(compacted.as_ref())
    }

    fn pack_non_empty<M: SourceMesh + ?Sized>(&self, mesh: &M, vertex_count: u32) -> PackedMesh {
        let options = &self.options;
        let layout = Arc::new(VertexLayout::for_mesh(mesh, options.color_format));
        debug_assert!(layout.validate().is_ok());

        let stride = layout.stride() as usize;
        let mut vertex_data = vec![0u8; vertex_count as usize * stride];
        let mut bounding_box = BoundingBox::EMPTY;

        {
            profile_scope!("pack_vertices");
            for (index, slot) in vertex_data.chunks_exact_mut(stride).enumerate() {
                let mut vertex = mesh.vertex(index);
                vertex.position =
                    offset_then_scale(&vertex.position, &options.offset, options.scale);
                bounding_box.merge_point(&vertex.position);
                for attribute in &layout.attributes {
                    write_attribute(slot, attribute, &vertex);
                }
            }
        }

        let bounding_sphere = {
            profile_scope!("fit_bounding_sphere");
            let position_offset = layout
                .attribute(VertexAttributeSemantic::Position)
                .map_or(0, |attr| attr.offset as usize);
            BoundingSphere::from_strided_positions(
                &vertex_data,
                position_offset,
                vertex_count as usize,
                stride,
            )
            .unwrap_or_else(|| {
                log::warn!("Packed positions out of range, using box-derived bounding sphere");
                BoundingSphere::from_box(&bounding_box)
            })
        };

        let indices = options.winding.apply(mesh.triangle_indices());
        profile_plot!("packed_vertex_bytes", vertex_data.len());

        log::debug!(
            "Packed mesh {:?}: {} vertices x {} bytes ({}), {} indices",
            options.label.as_deref().unwrap_or("<unnamed>"),
            vertex_count,
            stride,
            layout.label.as_deref().unwrap_or("<unnamed layout>"),
            indices.len()
        );

        PackedMesh::new(
            layout,
            vertex_data,
            vertex_count,
            indices,
            bounding_box,
            bounding_sphere,
            options.label.clone(),
        )
    }
}

static_assertions::assert_impl_all!(MeshPacker: Send, Sync);

/// Pack a mesh with the given position offset and scale, using default options
/// otherwise.
pub fn pack_mesh<M: SourceMesh + ?Sized>(
    mesh: Option<&M>,
    offset: Vec3,
    scale: f32,
) -> Option<PackedMesh> {
    MeshPacker::new(PackOptions::new().with_offset(offset).with_scale(scale)).pack(mesh)
}

/// Check that an index list forms whole triangles over `vertex_count` vertices.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), PackError> {
    if indices.len() % 3 != 0 {
        return Err(PackError::IndexCountNotMultipleOfThree {
            count: indices.len(),
        });
    }
    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertex_count)
    {
        return Err(PackError::IndexOutOfRange {
            position,
            index,
            vertex_count,
        });
    }
    Ok(())
}

/// Check that both counts fit in 32 bits, returning the vertex count.
fn check_counts(vertex_count: usize, index_count: usize) -> Result<u32, PackError> {
    let vertices = u32::try_from(vertex_count).map_err(|_| PackError::VertexCountOverflow {
        count: vertex_count,
    })?;
    if u32::try_from(index_count).is_err() {
        return Err(PackError::IndexCountOverflow { count: index_count });
    }
    Ok(vertices)
}

/// Write one attribute of `vertex` into its range of the vertex slot.
///
/// Attributes the vertex lacks are left zeroed.
fn write_attribute(slot: &mut [u8], attribute: &VertexAttribute, vertex: &SourceVertex) {
    let dst = &mut slot[attribute.byte_range()];
    match attribute.semantic {
        VertexAttributeSemantic::Position => {
            let p = &vertex.position;
            write_f32s(dst, &[p.x, p.y, p.z]);
        }
        VertexAttributeSemantic::Normal => {
            if let Some(n) = &vertex.normal {
                write_f32s(dst, &[n.x, n.y, n.z]);
            }
        }
        VertexAttributeSemantic::TexCoord => {
            if let Some(uv) = &vertex.uv {
                write_f32s(dst, &[uv.x, uv.y]);
            }
        }
        VertexAttributeSemantic::Color => {
            if let Some(rgb) = &vertex.color {
                match attribute.format {
                    VertexAttributeFormat::Float4 => write_f32s(dst, &rgb_to_rgba_f32(rgb)),
                    _ => dst.copy_from_slice(&Color::from_vec3(rgb).to_bytes()),
                }
            }
        }
    }
}

/// Write floats as consecutive little-endian values. `dst` must hold exactly
/// `values.len() * 4` bytes.
fn write_f32s(dst: &mut [u8], values: &[f32]) {
    debug_assert_eq!(dst.len(), values.len() * 4);
    for (chunk, value) in dst.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

//! Source meshes: the read-only input side of packing.
//!
//! This module provides:
//! - [`SourceMesh`] - Accessor trait a mesh library implements to be packed
//! - [`SourceVertex`] - All attributes of one vertex
//! - [`SimpleMesh`] - Dense in-memory mesh with parallel attribute arrays
//! - [`SparseMesh`] - Mesh with free slots, compacted into a [`SimpleMesh`]

use crate::math::{Vec2, Vec3};

/// All attributes of a single vertex, as returned by [`SourceMesh::vertex`].
///
/// Optional attributes are `None` when the vertex does not carry them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceVertex {
    /// Vertex position.
    pub position: Vec3,
    /// Vertex normal.
    pub normal: Option<Vec3>,
    /// Texture coordinates.
    pub uv: Option<Vec2>,
    /// RGB color, nominally in `[0, 1]`.
    pub color: Option<Vec3>,
}

impl SourceVertex {
    /// A vertex with only a position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
            color: None,
        }
    }

    /// Set the normal.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Set the texture coordinates.
    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = Some(uv);
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = Some(color);
        self
    }
}

/// Read-only access to a triangle mesh.
///
/// Implemented by mesh libraries (or adapters around them) so their meshes
/// can be packed. The mesh must stay unchanged while it is borrowed.
pub trait SourceMesh {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// All attributes of vertex `index` (`index < vertex_count()`).
    fn vertex(&self, index: usize) -> SourceVertex;

    /// Whether the mesh carries per-vertex normals.
    fn has_normals(&self) -> bool;

    /// Whether the mesh carries per-vertex texture coordinates.
    fn has_uvs(&self) -> bool;

    /// Whether the mesh carries per-vertex colors.
    fn has_colors(&self) -> bool;

    /// Flattened triangle list, three indices per triangle.
    fn triangle_indices(&self) -> &[u32];

    /// Number of triangles.
    fn triangle_count(&self) -> usize {
        self.triangle_indices().len() / 3
    }

    /// Whether the mesh has no vertices.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// A dense triangle mesh stored as parallel attribute arrays.
///
/// An empty optional attribute array means the attribute is absent. The
/// `with_*` setters can be called in any order; arrays are matched to
/// positions only when the mesh is read, and a vertex past the end of a
/// shorter array reads as lacking that attribute.
///
/// # Example
///
/// ```ignore
/// let mesh = SimpleMesh::new()
///     .with_positions(vec![
///         Vec3::new(0.0, 0.0, 0.0),
///         Vec3::new(1.0, 0.0, 0.0),
///         Vec3::new(0.0, 1.0, 0.0),
///     ])
///     .with_triangles(&[[0, 1, 2]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    colors: Vec<Vec3>,
    indices: Vec<u32>,
}

impl SimpleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set vertex positions.
    pub fn with_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.positions = positions;
        self
    }

    /// Set vertex normals, one per position.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    /// Set vertex texture coordinates, one per position.
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = uvs;
        self
    }

    /// Set vertex colors, one per position.
    pub fn with_colors(mut self, colors: Vec<Vec3>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the flattened triangle index list.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Set the triangle list from index triples.
    pub fn with_triangles(mut self, triangles: &[[u32; 3]]) -> Self {
        self.indices = triangles.iter().flatten().copied().collect();
        self
    }

    /// Append a vertex, returning its index.
    ///
    /// An attribute is recorded only if the mesh already carries it or this
    /// is the first vertex; a vertex that lacks a carried attribute stores
    /// zeros for it.
    ///
    /// Returns `u32::MAX` once the mesh outgrows 32-bit indices; such a mesh
    /// is rejected when packed.
    pub fn push_vertex(&mut self, vertex: SourceVertex) -> u32 {
        let first = self.positions.is_empty();
        let index = slot_id(self.positions.len());
        self.positions.push(vertex.position);

        if (first && vertex.normal.is_some()) || !self.normals.is_empty() {
            self.normals.push(vertex.normal.unwrap_or_else(Vec3::zeros));
        }
        if (first && vertex.uv.is_some()) || !self.uvs.is_empty() {
            self.uvs.push(vertex.uv.unwrap_or_else(Vec2::zeros));
        }
        if (first && vertex.color.is_some()) || !self.colors.is_empty() {
            self.colors.push(vertex.color.unwrap_or_else(Vec3::zeros));
        }
        index
    }

    /// Append a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl SourceMesh for SimpleMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex(&self, index: usize) -> SourceVertex {
        SourceVertex {
            position: self.positions[index],
            normal: self.normals.get(index).copied(),
            uv: self.uvs.get(index).copied(),
            color: self.colors.get(index).copied(),
        }
    }

    fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    fn triangle_indices(&self) -> &[u32] {
        &self.indices
    }
}

/// A triangle mesh with free vertex and triangle slots.
///
/// Editing operations on a dynamic mesh leave holes behind: removed vertices
/// and triangles keep their slot so other ids stay valid. A sparse mesh is
/// not packed directly; [`SparseMesh::compact`] first renumbers it densely.
#[derive(Debug, Clone, Default)]
pub struct SparseMesh {
    vertices: Vec<Option<SourceVertex>>,
    triangles: Vec<Option<[u32; 3]>>,
    has_normals: bool,
    has_uvs: bool,
    has_colors: bool,
}

impl SparseMesh {
    /// Create an empty mesh with the given attribute flags.
    pub fn new(has_normals: bool, has_uvs: bool, has_colors: bool) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            has_normals,
            has_uvs,
            has_colors,
        }
    }

    /// Append a vertex, returning its slot id (`u32::MAX` past the 32-bit range).
    pub fn append_vertex(&mut self, vertex: SourceVertex) -> u32 {
        self.vertices.push(Some(vertex));
        slot_id(self.vertices.len() - 1)
    }

    /// Append a triangle, returning its slot id (`u32::MAX` past the 32-bit range).
    pub fn append_triangle(&mut self, a: u32, b: u32, c: u32) -> u32 {
        self.triangles.push(Some([a, b, c]));
        slot_id(self.triangles.len() - 1)
    }

    /// Free a vertex slot together with every triangle that references it.
    ///
    /// Returns `false` if the slot was already free or out of range.
    pub fn remove_vertex(&mut self, id: u32) -> bool {
        let Some(slot) = self.vertices.get_mut(id as usize) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        for triangle in &mut self.triangles {
            if triangle.is_some_and(|t| t.contains(&id)) {
                *triangle = None;
            }
        }
        true
    }

    /// Free a triangle slot. Returns `false` if it was already free.
    pub fn remove_triangle(&mut self, id: u32) -> bool {
        self.triangles
            .get_mut(id as usize)
            .and_then(Option::take)
            .is_some()
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_some()).count()
    }

    /// Number of live triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_some()).count()
    }

    /// Highest vertex slot id plus one.
    pub fn max_vertex_id(&self) -> usize {
        self.vertices.len()
    }

    /// Whether every slot is live.
    pub fn is_compact(&self) -> bool {
        self.vertices.iter().all(Option::is_some) && self.triangles.iter().all(Option::is_some)
    }

    /// Renumber live vertices and triangles densely, in slot order.
    ///
    /// Triangles referencing a free vertex slot are dropped.
    pub fn compact(&self) -> SimpleMesh {
        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut mesh = SimpleMesh::new();

        for (slot, vertex) in self.vertices.iter().enumerate() {
            let Some(vertex) = vertex else { continue };
            let mut vertex = *vertex;
            if !self.has_normals {
                vertex.normal = None;
            } else if vertex.normal.is_none() {
                vertex.normal = Some(Vec3::zeros());
            }
            if !self.has_uvs {
                vertex.uv = None;
            } else if vertex.uv.is_none() {
                vertex.uv = Some(Vec2::zeros());
            }
            if !self.has_colors {
                vertex.color = None;
            } else if vertex.color.is_none() {
                vertex.color = Some(Vec3::zeros());
            }
            remap[slot] = mesh.push_vertex(vertex);
        }

        let mut dropped = 0usize;
        for triangle in self.triangles.iter().flatten() {
            let mapped = triangle.map(|v| remap.get(v as usize).copied().unwrap_or(u32::MAX));
            if mapped.contains(&u32::MAX) {
                dropped += 1;
                continue;
            }
            mesh.push_triangle(mapped[0], mapped[1], mapped[2]);
        }
        if dropped > 0 {
            log::warn!("Dropped {dropped} triangles referencing free vertex slots");
        }

        log::trace!(
            "Compacted sparse mesh: {} -> {} vertices, {} triangles",
            self.vertices.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }
}

/// Convert a slot position to a 32-bit id, saturating at `u32::MAX`.
fn slot_id(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

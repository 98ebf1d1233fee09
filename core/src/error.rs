//! Error types for validated packing.

/// Errors reported by [`MeshPacker::try_pack`](crate::mesh::MeshPacker::try_pack).
///
/// The unvalidated [`MeshPacker::pack`](crate::mesh::MeshPacker::pack) trusts
/// the source mesh and never reports these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// The triangle index list length is not a multiple of three.
    IndexCountNotMultipleOfThree {
        /// Total number of indices.
        count: usize,
    },
    /// A triangle index references a vertex that does not exist.
    IndexOutOfRange {
        /// Position of the offending entry in the index list.
        position: usize,
        /// The index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// The vertex count does not fit in a 32-bit index.
    VertexCountOverflow {
        /// Number of vertices in the mesh.
        count: usize,
    },
    /// The index list is longer than a 32-bit count can describe.
    IndexCountOverflow {
        /// Total number of indices.
        count: usize,
    },
}

impl std::fmt::Display for PackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexCountNotMultipleOfThree { count } => {
                write!(f, "index count {count} is not a multiple of 3")
            }
            Self::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            Self::VertexCountOverflow { count } => {
                write!(f, "vertex count {count} exceeds the 32-bit index range")
            }
            Self::IndexCountOverflow { count } => {
                write!(f, "index count {count} exceeds the 32-bit range")
            }
        }
    }
}

impl std::error::Error for PackError {}

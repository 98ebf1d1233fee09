//! Interleaved vertex layout definitions.
//!
//! A [`VertexLayout`] describes one interleaved vertex buffer: an ordered list
//! of attributes, each with a semantic, a format and a byte offset inside the
//! vertex slot. The layout is built at pack time from the attributes a source
//! mesh actually carries, so the set of attributes varies per mesh.
//!
//! # Canonical Order
//!
//! Position always comes first and is always present. Normal, TexCoord and
//! Color follow in that order, each only when the mesh provides it. Attributes
//! are packed back to back with no padding, so the stride is the sum of the
//! attribute sizes.
//!
//! # Example
//!
//! ```ignore
//! // Position + normal + color (Unorm8x4): 12 + 12 + 4 = 28 bytes
//! let layout = VertexLayout::for_attributes(true, false, true, ColorFormat::Unorm8x4);
//! assert_eq!(layout.stride(), 28);
//! ```

use std::sync::Arc;

use super::source::SourceMesh;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Texture coordinates (float2).
    TexCoord,
    /// Vertex color (unorm8x4 or float4).
    Color,
}

impl VertexAttributeSemantic {
    /// Position of this semantic in the canonical attribute order.
    pub fn index(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::TexCoord => 2,
            Self::Color => 3,
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// Four 8-bit unsigned integers (normalized to 0.0-1.0).
    Unorm8x4,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
            Self::Unorm8x4 => 4,
        }
    }
}

/// How vertex colors are stored in the packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// RGBA8, 4 bytes per vertex.
    #[default]
    Unorm8x4,
    /// RGBA as 32-bit floats, 16 bytes per vertex.
    Float4,
}

impl ColorFormat {
    /// The vertex attribute format used for this color format.
    pub fn attribute_format(&self) -> VertexAttributeFormat {
        match self {
            Self::Unorm8x4 => VertexAttributeFormat::Unorm8x4,
            Self::Float4 => VertexAttributeFormat::Float4,
        }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexAttributeSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex slot.
    pub offset: u32,
}

impl VertexAttribute {
    /// Create a new vertex attribute.
    pub fn new(
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
        offset: u32,
    ) -> Self {
        Self {
            semantic,
            format,
            offset,
        }
    }

    /// Create a position attribute (float3).
    pub fn position(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float3,
            offset,
        )
    }

    /// Create a normal attribute (float3).
    pub fn normal(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::Normal,
            VertexAttributeFormat::Float3,
            offset,
        )
    }

    /// Create a texcoord attribute (float2).
    pub fn texcoord(offset: u32) -> Self {
        Self::new(
            VertexAttributeSemantic::TexCoord,
            VertexAttributeFormat::Float2,
            offset,
        )
    }

    /// Create a color attribute in the given color format.
    pub fn color(offset: u32, format: ColorFormat) -> Self {
        Self::new(
            VertexAttributeSemantic::Color,
            format.attribute_format(),
            offset,
        )
    }

    /// Size in bytes of this attribute.
    pub fn size(&self) -> usize {
        self.format.size()
    }

    /// Byte range of this attribute inside a vertex slot.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.size()
    }
}

/// Describes the layout of one interleaved vertex buffer.
///
/// Each packed mesh gets its own layout, held in an `Arc` so the mesh and the
/// [`MeshDescriptor`](super::MeshDescriptor)s derived from it share one copy.
/// Layouts built from the same attribute flags compare equal, so callers can
/// deduplicate them by value (the type is `Hash`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// The vertex attributes in buffer order.
    pub attributes: Vec<VertexAttribute>,
    /// Stride in bytes between consecutive vertices.
    pub stride: u32,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            stride: 0,
            label: None,
        }
    }

    /// Append an attribute at the current end of the vertex slot.
    ///
    /// The attribute's offset is set to the current stride and the stride
    /// grows by the attribute size.
    pub fn with_attribute(
        mut self,
        semantic: VertexAttributeSemantic,
        format: VertexAttributeFormat,
    ) -> Self {
        let attribute = VertexAttribute::new(semantic, format, self.stride);
        self.stride += format.size() as u32;
        self.attributes.push(attribute);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the canonical layout for a set of present attributes.
    pub fn for_attributes(
        has_normals: bool,
        has_uvs: bool,
        has_colors: bool,
        color_format: ColorFormat,
    ) -> Self {
        let mut layout = Self::new().with_attribute(
            VertexAttributeSemantic::Position,
            VertexAttributeFormat::Float3,
        );
        let mut label = String::from("position");

        if has_normals {
            layout = layout.with_attribute(
                VertexAttributeSemantic::Normal,
                VertexAttributeFormat::Float3,
            );
            label.push_str("_normal");
        }
        if has_uvs {
            layout = layout.with_attribute(
                VertexAttributeSemantic::TexCoord,
                VertexAttributeFormat::Float2,
            );
            label.push_str("_uv");
        }
        if has_colors {
            layout = layout.with_attribute(
                VertexAttributeSemantic::Color,
                color_format.attribute_format(),
            );
            label.push_str("_color");
        }

        layout.with_label(label)
    }

    /// Build the canonical layout matching a source mesh's attribute flags.
    pub fn for_mesh<M: SourceMesh + ?Sized>(mesh: &M, color_format: ColorFormat) -> Self {
        Self::for_attributes(
            mesh.has_normals(),
            mesh.has_uvs(),
            mesh.has_colors(),
            color_format,
        )
    }

    /// Position-only layout (12 bytes per vertex).
    pub fn position_only() -> Arc<Self> {
        Arc::new(Self::for_attributes(
            false,
            false,
            false,
            ColorFormat::default(),
        ))
    }

    /// Get the stride in bytes.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexAttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }

    /// Semantics in buffer order.
    pub fn semantics(&self) -> impl Iterator<Item = VertexAttributeSemantic> + '_ {
        self.attributes.iter().map(|attr| attr.semantic)
    }

    /// Validate the layout.
    ///
    /// Checks that position comes first, attributes follow the canonical
    /// order without repeats, and the attributes tile the stride exactly.
    pub fn validate(&self) -> Result<(), String> {
        match self.attributes.first() {
            Some(first) if first.semantic == VertexAttributeSemantic::Position => {}
            Some(first) => {
                return Err(format!(
                    "First attribute is {:?}, expected Position",
                    first.semantic
                ));
            }
            None => return Err("Layout has no attributes".to_string()),
        }

        let mut expected_offset = 0u32;
        let mut last_index = None;
        for attr in &self.attributes {
            if attr.offset != expected_offset {
                return Err(format!(
                    "Attribute {:?} at offset {} but expected {}",
                    attr.semantic, attr.offset, expected_offset
                ));
            }
            if let Some(last) = last_index
                && attr.semantic.index() <= last
            {
                return Err(format!(
                    "Attribute {:?} is out of canonical order",
                    attr.semantic
                ));
            }
            last_index = Some(attr.semantic.index());
            expected_offset += attr.size() as u32;
        }

        if expected_offset != self.stride {
            return Err(format!(
                "Attributes cover {} bytes but stride is {}",
                expected_offset, self.stride
            ));
        }
        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(VertexLayout: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_attribute_format_size() {
        assert_eq!(VertexAttributeFormat::Float2.size(), 8);
        assert_eq!(VertexAttributeFormat::Float3.size(), 12);
        assert_eq!(VertexAttributeFormat::Float4.size(), 16);
        assert_eq!(VertexAttributeFormat::Unorm8x4.size(), 4);
    }

    #[test]
    fn test_position_only() {
        let layout = VertexLayout::position_only();
        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.attribute_count(), 1);
        assert_eq!(layout.attributes[0], VertexAttribute::position(0));
        assert_eq!(layout.label.as_deref(), Some("position"));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_full_layout_offsets() {
        let layout = VertexLayout::for_attributes(true, true, true, ColorFormat::Unorm8x4);

        assert_eq!(
            layout.attributes,
            vec![
                VertexAttribute::position(0),
                VertexAttribute::normal(12),
                VertexAttribute::texcoord(24),
                VertexAttribute::color(32, ColorFormat::Unorm8x4),
            ]
        );
        assert_eq!(layout.stride(), 36);
        assert_eq!(layout.label.as_deref(), Some("position_normal_uv_color"));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_normal_and_color_without_uv() {
        let layout = VertexLayout::for_attributes(true, false, true, ColorFormat::Unorm8x4);
        let semantics: Vec<_> = layout.semantics().collect();

        assert_eq!(
            semantics,
            vec![
                VertexAttributeSemantic::Position,
                VertexAttributeSemantic::Normal,
                VertexAttributeSemantic::Color,
            ]
        );
        assert_eq!(layout.stride(), 12 + 12 + 4);
        assert!(!layout.has_semantic(VertexAttributeSemantic::TexCoord));
        assert_eq!(
            layout.attribute(VertexAttributeSemantic::Color).map(|a| a.offset),
            Some(24)
        );
    }

    #[test]
    fn test_float_color_layout() {
        let layout = VertexLayout::for_attributes(false, true, true, ColorFormat::Float4);
        assert_eq!(layout.stride(), 12 + 8 + 16);
        let color = layout.attribute(VertexAttributeSemantic::Color).unwrap();
        assert_eq!(color.format, VertexAttributeFormat::Float4);
        assert_eq!(color.byte_range(), 20..36);
    }

    #[test]
    fn test_validation_rejects_bad_layouts() {
        let empty = VertexLayout::new();
        assert!(empty.validate().is_err());

        let normal_first = VertexLayout::new()
            .with_attribute(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3);
        assert!(normal_first.validate().is_err());

        let out_of_order = VertexLayout::new()
            .with_attribute(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3)
            .with_attribute(VertexAttributeSemantic::Color, VertexAttributeFormat::Unorm8x4)
            .with_attribute(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3);
        assert!(out_of_order.validate().is_err());

        let mut padded = VertexLayout::for_attributes(true, false, false, ColorFormat::Unorm8x4);
        padded.stride += 4;
        assert!(padded.validate().is_err());
    }
}

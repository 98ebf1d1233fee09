//! Packed vertex colors.

use crate::math::Vec3;

/// 8-bit-per-channel RGBA color as stored in a `Unorm8x4` vertex attribute.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Create a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from float channels in `[0, 1]`.
    ///
    /// Out-of-range channels are clamped; the alpha channel is 255.
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self::new(unorm8(r), unorm8(g), unorm8(b), 255)
    }

    /// Create an opaque color from a float RGB vector.
    pub fn from_vec3(rgb: &Vec3) -> Self {
        Self::from_rgb_f32(rgb.x, rgb.y, rgb.z)
    }

    /// Channels as `[r, g, b, a]` bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Convert a float channel to an 8-bit unorm value.
///
/// Truncates `value * 255` toward zero and clamps to `0..=255`. NaN maps to 0.
pub fn unorm8(value: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    let scaled = (value * 255.0) as i32;
    scaled.clamp(0, 255) as u8
}

/// Clamp a float RGB color to `[0, 1]` and append an opaque alpha.
///
/// Used for `Float4` color attributes, which keep float precision.
pub fn rgb_to_rgba_f32(rgb: &Vec3) -> [f32; 4] {
    [
        rgb.x.clamp(0.0, 1.0),
        rgb.y.clamp(0.0, 1.0),
        rgb.z.clamp(0.0, 1.0),
        1.0,
    ]
}

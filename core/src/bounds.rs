//! Bounding volumes computed while packing.
//!
//! - [`BoundingBox`] - Axis-aligned box accumulated point by point
//! - [`BoundingSphere`] - Centroid sphere fit over a point set

use crate::math::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Empty box. Merging the first point collapses it onto that point.
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
        max: Vec3::new(-f32::MAX, -f32::MAX, -f32::MAX),
    };

    /// Creates a box from min and max corners.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points` (`EMPTY` for no points).
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.merge_point(p);
        }
        bounds
    }

    /// Grow the box to include `point`.
    #[inline]
    pub fn merge_point(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Union of this box with another.
    #[inline]
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// True if no point has been merged (min lies above max on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box.
    #[inline]
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size of the box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Checks if a point is inside the box (inclusive).
    #[inline]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl BoundingSphere {
    /// Zero-radius sphere at the origin.
    pub const EMPTY: Self = Self {
        center: Vec3::new(0.0, 0.0, 0.0),
        radius: 0.0,
    };

    /// Creates a sphere from center and radius.
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Fit a sphere to a point set.
    ///
    /// The center is the centroid of the points and the radius is the
    /// largest distance from the centroid to any point. Returns [`Self::EMPTY`]
    /// for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }
        let center = points.iter().fold(Vec3::zeros(), |acc, p| acc + p) / points.len() as f32;
        let radius_sq = points
            .iter()
            .map(|p| (p - center).norm_squared())
            .fold(0.0f32, f32::max);
        Self::new(center, radius_sq.sqrt())
    }

    /// Fit a sphere to positions stored inside an interleaved vertex buffer.
    ///
    /// Reads `count` little-endian `[f32; 3]` positions, the first at byte
    /// `offset`, each following one `stride` bytes further. Returns `None` if
    /// any position would read past the end of `data`.
    pub fn from_strided_positions(
        data: &[u8],
        offset: usize,
        count: usize,
        stride: usize,
    ) -> Option<Self> {
        if count == 0 {
            return Some(Self::EMPTY);
        }
        let last_end = (count - 1)
            .checked_mul(stride)?
            .checked_add(offset)?
            .checked_add(12)?;
        if last_end > data.len() {
            return None;
        }

        let read = |i: usize| -> Vec3 {
            let start = offset + i * stride;
            let mut c = [0.0f32; 3];
            for (k, value) in c.iter_mut().enumerate() {
                let at = start + k * 4;
                *value = f32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
            }
            Vec3::new(c[0], c[1], c[2])
        };

        let mut sum = Vec3::zeros();
        for i in 0..count {
            sum += read(i);
        }
        let center = sum / count as f32;

        let mut radius_sq = 0.0f32;
        for i in 0..count {
            radius_sq = radius_sq.max((read(i) - center).norm_squared());
        }

        Some(Self::new(center, radius_sq.sqrt()))
    }

    /// Sphere circumscribing a bounding box.
    pub fn from_box(bounds: &BoundingBox) -> Self {
        if bounds.is_empty() {
            return Self::EMPTY;
        }
        Self::new(bounds.center(), bounds.extents().norm())
    }

    /// Checks if a point is inside the sphere (inclusive).
    #[inline]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<Vec3> {
        let mut corners = Vec::new();
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    corners.push(Vec3::new(x, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn empty_box_collapses_on_first_point() {
        let mut bounds = BoundingBox::EMPTY;
        assert!(bounds.is_empty());

        bounds.merge_point(&Vec3::new(1.0, 2.0, 3.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn box_from_points() {
        let bounds = BoundingBox::from_points(&cube_corners());
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(bounds.center(), Vec3::zeros());
        assert_eq!(bounds.extents(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(bounds.size(), Vec3::new(2.0, 2.0, 2.0));
        assert!(bounds.contains_point(&Vec3::new(0.5, -0.5, 1.0)));
        assert!(!bounds.contains_point(&Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn box_merge() {
        let a = BoundingBox::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Vec3::new(-1.0, 0.5, 0.5), Vec3::new(0.5, 2.0, 0.5));
        let u = a.merge(&b);
        assert_eq!(u.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Vec3::new(1.0, 2.0, 1.0));

        // Merging with EMPTY is the identity.
        assert_eq!(a.merge(&BoundingBox::EMPTY), a);
    }

    #[test]
    fn sphere_of_symmetric_cube() {
        let sphere = BoundingSphere::from_points(&cube_corners());
        assert!(sphere.center.norm() < 1e-6);
        assert!((sphere.radius - 3.0f32.sqrt()).abs() < 1e-5);
        for corner in cube_corners() {
            assert!(sphere.contains_point(&(corner * 0.999)));
        }
    }

    #[test]
    fn sphere_of_single_point() {
        let sphere = BoundingSphere::from_points(&[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(sphere.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sphere.radius, 0.0);
        assert_eq!(BoundingSphere::from_points(&[]), BoundingSphere::EMPTY);
    }

    #[test]
    fn strided_positions_skip_other_attributes() {
        // Each 16-byte vertex: position (12 bytes) followed by 4 junk bytes.
        let mut data = Vec::new();
        for p in cube_corners() {
            data.extend_from_slice(bytemuck::cast_slice(&[p.x, p.y, p.z]));
            data.extend_from_slice(&[0xFF; 4]);
        }

        let sphere = BoundingSphere::from_strided_positions(&data, 0, 8, 16).unwrap();
        let reference = BoundingSphere::from_points(&cube_corners());
        assert_eq!(sphere, reference);
    }

    #[test]
    fn strided_positions_out_of_range() {
        let data = vec![0u8; 24];
        assert!(BoundingSphere::from_strided_positions(&data, 0, 2, 12).is_some());
        assert!(BoundingSphere::from_strided_positions(&data, 4, 2, 12).is_none());
        assert!(BoundingSphere::from_strided_positions(&data, 0, 3, 12).is_none());
        assert_eq!(
            BoundingSphere::from_strided_positions(&[], 0, 0, 12),
            Some(BoundingSphere::EMPTY)
        );
    }

    #[test]
    fn sphere_from_box() {
        let bounds = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let sphere = BoundingSphere::from_box(&bounds);
        assert_eq!(sphere.center, Vec3::zeros());
        assert!((sphere.radius - 3.0f32.sqrt()).abs() < 1e-6);
        assert_eq!(
            BoundingSphere::from_box(&BoundingBox::EMPTY),
            BoundingSphere::EMPTY
        );
    }
}

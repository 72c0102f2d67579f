use bevy::prelude::*;

/// Axis-aligned bounding box in world space (pixels, y-down).
/// Always derived from a sprite or a mover on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl BoundingBox {
    pub const fn from_center_half_size(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_half_size(self.center, self.half_size)
    }

    /// Same box moved by a displacement
    pub fn translated(&self, displacement: Vec2) -> Self {
        Self::from_center_half_size(self.center + displacement, self.half_size)
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Whether the box lies entirely inside `bounds` (edges may touch)
    pub fn is_within(&self, bounds: Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x >= bounds.min.x && min.y >= bounds.min.y && max.x <= bounds.max.x && max.y <= bounds.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(x: f32, y: f32) -> BoundingBox {
        BoundingBox::from_center_half_size(Vec2::new(x, y), Vec2::splat(8.0))
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = unit_box(0.0, 0.0);
        assert!(a.overlaps(&unit_box(15.0, 0.0)));
        assert!(!a.overlaps(&unit_box(16.0, 0.0)));
        assert!(!a.overlaps(&unit_box(0.0, -16.0)));
        assert!(a.overlaps(&unit_box(10.0, 10.0)));
    }

    #[test]
    fn test_is_within() {
        let bounds = Rect::new(-16.0, -16.0, 16.0, 16.0);
        assert!(unit_box(8.0, 8.0).is_within(bounds));
        assert!(!unit_box(9.0, 8.0).is_within(bounds));
    }

    #[test]
    fn test_translated() {
        let moved = unit_box(0.0, 0.0).translated(Vec2::new(16.0, -4.0));
        assert_eq!(moved.center, Vec2::new(16.0, -4.0));
        assert_eq!(moved.rect(), Rect::new(8.0, -12.0, 24.0, 4.0));
    }
}

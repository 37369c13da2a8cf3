//! Geometry kernel: axis-aligned rectangles, circles and the pure functions the
//! productions build on.
//!
//! Coordinates are abstract plot units with `y` growing downwards, matching the
//! drawing surface the finished layout is handed to.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod border;
pub mod circle;
pub mod split;

pub use border::{border_between, shared_border, snap_to_grid};
pub use circle::{circle_in_rect, circles_collide};
pub use split::{choose_split_mode, split, SplitMode};

/// Grid that borders and paths are snapped to.
pub const GRID_UNIT: f32 = 10.0;

/// Tolerance used when testing whether two edges touch.
///
/// Edges reached through different split chains can differ by a few `f32`
/// ulps at plot coordinates, so this is far above ulp size and far below the
/// grid unit.
pub const TOUCH_EPSILON: f32 = 1e-3;

/// Axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// X coordinate of the right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(&self) -> f32 {
        self.w.min(self.h)
    }

    /// Length of the longer side. For a border strip this is its length along
    /// the touching line.
    #[inline]
    pub fn max_side(&self) -> f32 {
        self.w.max(self.h)
    }

    /// Shrinks the rectangle by `pad` on every side.
    pub fn inset(&self, pad: f32) -> Rect {
        Rect::new(
            self.x + pad,
            self.y + pad,
            self.w - 2.0 * pad,
            self.h - 2.0 * pad,
        )
    }

    /// True when `other` lies inside `self`, allowing `tolerance` on every edge.
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }

    /// True when the rectangle has a strictly positive extent on both axes.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Moves the rectangle so it lies inside `bounds` where possible. A
    /// rectangle larger than `bounds` is pinned to its top-left corner.
    pub fn clamped_into(&self, bounds: &Rect) -> Rect {
        Rect::new(
            clamp_lo(self.x, bounds.x, bounds.right() - self.w),
            clamp_lo(self.y, bounds.y, bounds.bottom() - self.h),
            self.w,
            self.h,
        )
    }

    /// Keys the rectangle by its exact coordinates, for deduplicating snapped
    /// geometry.
    pub(crate) fn key(&self) -> [u32; 4] {
        [
            self.x.to_bits(),
            self.y.to_bits(),
            self.w.to_bits(),
            self.h.to_bits(),
        ]
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub r: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            r,
        }
    }

    /// Axis-aligned bounding square.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.r,
            self.center.y - self.r,
            2.0 * self.r,
            2.0 * self.r,
        )
    }
}

/// Clamps `v` into `[lo, hi]`, letting `lo` win when the range is inverted.
///
/// `f32::clamp` panics on `lo > hi`, which happens whenever a shape is larger
/// than the range it is clamped into.
#[inline]
pub fn clamp_lo(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(60.0, 40.0));
        assert_eq!(r.min_side(), 40.0);
        assert_eq!(r.max_side(), 100.0);
        assert_eq!(r.area(), 4000.0);
    }

    #[test]
    fn inset_shrinks_every_side() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).inset(10.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 80.0, 30.0));
    }

    #[test]
    fn contains_rect_honours_tolerance() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 20.0, 20.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(-5.0, 10.0, 20.0, 20.0), 0.0));
        assert!(outer.contains_rect(&Rect::new(-5.0, 10.0, 20.0, 20.0), 10.0));
    }

    #[test]
    fn clamped_into_keeps_inside_and_pins_oversized() {
        let bounds = Rect::new(10.0, 10.0, 100.0, 100.0);
        let moved = Rect::new(105.0, 0.0, 10.0, 20.0).clamped_into(&bounds);
        assert_eq!(moved, Rect::new(100.0, 10.0, 10.0, 20.0));

        let oversized = Rect::new(40.0, 40.0, 200.0, 10.0).clamped_into(&bounds);
        assert_eq!(oversized.x, 10.0);
        assert_eq!(oversized.y, 40.0);
    }

    #[test]
    fn circle_bounds_is_square() {
        let c = Circle::new(50.0, 40.0, 10.0);
        assert_eq!(c.bounds(), Rect::new(40.0, 30.0, 20.0, 20.0));
    }

    #[test]
    fn clamp_lo_does_not_panic_on_inverted_range() {
        assert_eq!(clamp_lo(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_lo(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_lo(-1.0, 0.0, 10.0), 0.0);
    }
}

//! Border detection between touching rectangles and grid snapping.
use crate::geometry::{Rect, GRID_UNIT, TOUCH_EPSILON};

/// Overlap a touching pair needs before [`border_between`] reports a border.
pub const MIN_TOUCH_OVERLAP: f32 = 4.0;

/// Shortest border that survives snapping. Shorter ones are noise and dropped.
pub const MIN_BORDER_LEN: f32 = 20.0;

/// Rounds a single coordinate to the nearest grid multiple, halves rounding up.
#[inline]
fn snap(v: f32) -> f32 {
    (v / GRID_UNIT + 0.5).floor() * GRID_UNIT
}

/// Rounds `x`, `y`, `w` and `h` independently to the 10-unit grid.
pub fn snap_to_grid(rect: &Rect) -> Rect {
    Rect::new(snap(rect.x), snap(rect.y), snap(rect.w), snap(rect.h))
}

/// Which side of `a` the rectangle `b` touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Touch {
    Right,
    Left,
    Below,
    Above,
}

/// Length of the overlap of `[a1, a2]` and `[b1, b2]`; negative when disjoint.
#[inline]
fn overlap(a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    a2.min(b2) - a1.max(b1)
}

/// Finds the first touching case (right, left, below, above) whose overlap
/// exceeds `min_overlap` and builds the border strip for it.
fn touching_strip(a: &Rect, b: &Rect, thickness: f32, min_overlap: f32) -> Option<Rect> {
    let half = thickness / 2.0;
    let cases = [
        (Touch::Right, (a.right() - b.x).abs()),
        (Touch::Left, (b.right() - a.x).abs()),
        (Touch::Below, (a.bottom() - b.y).abs()),
        (Touch::Above, (b.bottom() - a.y).abs()),
    ];

    for (touch, gap) in cases {
        if gap >= TOUCH_EPSILON {
            continue;
        }
        let strip = match touch {
            Touch::Right | Touch::Left => {
                let ov = overlap(a.y, a.bottom(), b.y, b.bottom());
                if ov <= min_overlap {
                    continue;
                }
                let line = if touch == Touch::Right { a.right() } else { a.x };
                Rect::new(line - half, a.y.max(b.y), thickness, ov)
            }
            Touch::Below | Touch::Above => {
                let ov = overlap(a.x, a.right(), b.x, b.right());
                if ov <= min_overlap {
                    continue;
                }
                let line = if touch == Touch::Below { a.bottom() } else { a.y };
                Rect::new(a.x.max(b.x), line - half, ov, thickness)
            }
        };
        return Some(strip);
    }

    None
}

/// Border strip of `thickness` centred on the line where `a` and `b` touch.
///
/// Returns `None` when the rectangles do not touch or only meet at a corner.
/// The strip is not snapped.
pub fn shared_border(a: &Rect, b: &Rect, thickness: f32) -> Option<Rect> {
    touching_strip(a, b, thickness, 0.0)
}

/// Snapped border between two sectors discovered after the fact.
///
/// Touching spans of [`MIN_TOUCH_OVERLAP`] units or less are ignored.
pub fn border_between(a: &Rect, b: &Rect, thickness: f32) -> Option<Rect> {
    touching_strip(a, b, thickness, MIN_TOUCH_OVERLAP).map(|r| snap_to_grid(&r))
}

/// Keeps a snapped border only when it is at least [`MIN_BORDER_LEN`] long.
pub fn keep_long_border(border: Rect) -> Option<Rect> {
    (border.max_side() >= MIN_BORDER_LEN).then_some(border)
}

//! Rejection sampling of non-overlapping circles inside a rectangle.
use rand::RngCore;
use tracing::trace;

use crate::geometry::{circle_in_rect, circles_collide, Circle, Rect};
use crate::sampling::rand_int;

/// Scatters up to `count` circles with integer radii in `radius` so that none
/// overlaps another and all stay inside the target rectangle.
#[derive(Debug, Clone)]
pub struct CircleScatter {
    /// Number of circles requested.
    pub count: usize,
    /// Inclusive radius range.
    pub radius: (i32, i32),
    /// Candidates drawn per circle before giving up on it.
    pub max_tries: usize,
}

impl CircleScatter {
    pub fn new(count: usize, radius: (i32, i32), max_tries: usize) -> Self {
        Self {
            count,
            radius,
            max_tries: max_tries.max(1),
        }
    }

    /// Draws one candidate: a radius from the range and a center at least one
    /// radius away from the top-left edges, snapped to whole units.
    fn candidate(&self, bounds: &Rect, rng: &mut dyn RngCore) -> Circle {
        let r = rand_int(self.radius.0, self.radius.1, rng);
        let x = bounds.x + rand_int(r, r.max((bounds.w - r as f32).floor() as i32), rng) as f32;
        let y = bounds.y + rand_int(r, r.max((bounds.h - r as f32).floor() as i32), rng) as f32;
        Circle::new(x, y, r as f32)
    }

    /// Places circles inside `bounds`. Circles whose tries run out are skipped,
    /// so the result may be shorter than `count`.
    pub fn generate(&self, bounds: &Rect, rng: &mut dyn RngCore) -> Vec<Circle> {
        let mut placed: Vec<Circle> = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let mut accepted = None;
            for _ in 0..self.max_tries {
                let c = self.candidate(bounds, rng);
                if !circle_in_rect(&c, bounds) {
                    continue;
                }
                if placed.iter().any(|p| circles_collide(&c, p)) {
                    continue;
                }
                accepted = Some(c);
                break;
            }
            match accepted {
                Some(c) => placed.push(c),
                None => trace!("No room for circle {} of {} in {:?}.", i + 1, self.count, bounds),
            }
        }

        placed
    }
}

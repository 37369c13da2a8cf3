//! Circle containment and collision tests.
use crate::geometry::{Circle, Rect};

/// True iff the circle's bounding square lies fully inside `rect`.
pub fn circle_in_rect(c: &Circle, rect: &Rect) -> bool {
    c.center.x - c.r >= rect.x
        && c.center.x + c.r <= rect.right()
        && c.center.y - c.r >= rect.y
        && c.center.y + c.r <= rect.bottom()
}

/// True iff the circles overlap or touch.
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    let rr = a.r + b.r;
    a.center.distance_squared(b.center) <= rr * rr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_exact() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(circle_in_rect(&Circle::new(25.0, 25.0, 25.0), &rect));
        assert!(!circle_in_rect(&Circle::new(24.9, 25.0, 25.0), &rect));
        assert!(!circle_in_rect(&Circle::new(50.0, 25.0, 26.0), &rect));
    }

    #[test]
    fn tangency_counts_as_collision() {
        let a = Circle::new(0.0, 0.0, 10.0);
        assert!(circles_collide(&a, &Circle::new(20.0, 0.0, 10.0)));
        assert!(circles_collide(&a, &Circle::new(5.0, 5.0, 1.0)));
        assert!(!circles_collide(&a, &Circle::new(20.5, 0.0, 10.0)));
    }
}

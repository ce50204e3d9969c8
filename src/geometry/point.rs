//! Normalized surface points
//!
//! Points are plain `kurbo::Point`s whose components are percentages of the
//! viewing surface. This module holds the range constants and the clamping
//! rule every drag mutation goes through.

use kurbo::{Point, Vec2};

/// Lower bound of both normalized axes
pub const SURFACE_MIN: f64 = 0.0;

/// Upper bound of both normalized axes
pub const SURFACE_MAX: f64 = 100.0;

/// Clamp a point into the `[0, 100]²` surface square.
///
/// Non-finite components collapse to the nearest bound so a bad cursor
/// reading can never poison the point set.
pub fn clamp_to_surface(point: Point) -> Point {
    Point::new(clamp_axis(point.x), clamp_axis(point.y))
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        return SURFACE_MIN;
    }
    value.clamp(SURFACE_MIN, SURFACE_MAX)
}

/// Whether a point lies inside the surface square (bounds included)
pub fn is_on_surface(point: Point) -> bool {
    (SURFACE_MIN..=SURFACE_MAX).contains(&point.x) && (SURFACE_MIN..=SURFACE_MAX).contains(&point.y)
}

/// Largest translation not exceeding `delta` that keeps every point on the
/// surface.
///
/// Used for whole-shape drags so the shape moves rigidly and stops at the
/// surface edge instead of being squashed against it.
pub fn limit_translation(points: &[Point], delta: Vec2) -> Vec2 {
    let mut dx = delta.x;
    let mut dy = delta.y;
    for p in points {
        // A point already outside never forces movement, it only blocks
        // movement further out.
        dx = dx.clamp((SURFACE_MIN - p.x).min(0.0), (SURFACE_MAX - p.x).max(0.0));
        dy = dy.clamp((SURFACE_MIN - p.y).min(0.0), (SURFACE_MAX - p.y).max(0.0));
    }
    Vec2::new(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_points_inside() {
        assert_eq!(clamp_to_surface(Point::new(-5.0, 120.0)), Point::new(0.0, 100.0));
        assert_eq!(clamp_to_surface(Point::new(42.0, 58.5)), Point::new(42.0, 58.5));
    }

    #[test]
    fn clamp_handles_non_finite_input() {
        let clamped = clamp_to_surface(Point::new(f64::NAN, f64::INFINITY));
        assert_eq!(clamped, Point::new(0.0, 100.0));
        assert!(is_on_surface(clamped));
    }

    #[test]
    fn translation_is_limited_by_nearest_edge() {
        let points = [Point::new(10.0, 10.0), Point::new(90.0, 50.0)];
        // x can only grow by 10 before the second point hits the edge
        let limited = limit_translation(&points, Vec2::new(25.0, -4.0));
        assert_eq!(limited, Vec2::new(10.0, -4.0));

        let limited = limit_translation(&points, Vec2::new(-30.0, -30.0));
        assert_eq!(limited, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn translation_passes_through_when_unbounded() {
        let points = [Point::new(40.0, 40.0), Point::new(60.0, 60.0)];
        assert_eq!(limit_translation(&points, Vec2::new(3.5, -2.0)), Vec2::new(3.5, -2.0));
    }
}

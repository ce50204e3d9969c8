//! Geometry utility functions
//!
//! Conversions between window space (logical pixels, origin top-left, y
//! down), normalized surface space (percent, origin top-left, y down) and
//! Bevy world space for a 2D camera centred on the window (origin centre,
//! y up).

use bevy::prelude::*;
use kurbo::Point;

/// Convert a window cursor position into normalized surface coordinates.
///
/// Returns `None` for a zero-sized window (minimised), where no meaningful
/// percentage exists.
pub fn cursor_to_normalized(cursor: Vec2, window_size: Vec2) -> Option<Point> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Point::new(
        (cursor.x / window_size.x * 100.0) as f64,
        (cursor.y / window_size.y * 100.0) as f64,
    ))
}

/// Convert a normalized surface point into world space for a centred 2D
/// camera with unit scale.
pub fn normalized_to_world(point: Point, window_size: Vec2) -> Vec2 {
    let fx = (point.x / 100.0) as f32;
    let fy = (point.y / 100.0) as f32;
    Vec2::new((fx - 0.5) * window_size.x, (0.5 - fy) * window_size.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_maps_to_percentages() {
        let size = Vec2::new(800.0, 400.0);
        let p = cursor_to_normalized(Vec2::new(200.0, 100.0), size).unwrap();
        assert_eq!(p, Point::new(25.0, 25.0));
    }

    #[test]
    fn zero_sized_window_has_no_mapping() {
        assert_eq!(cursor_to_normalized(Vec2::new(1.0, 1.0), Vec2::ZERO), None);
    }

    #[test]
    fn world_space_is_centred_and_flipped() {
        let size = Vec2::new(800.0, 400.0);
        assert_eq!(normalized_to_world(Point::new(50.0, 50.0), size), Vec2::ZERO);
        assert_eq!(normalized_to_world(Point::new(0.0, 0.0), size), Vec2::new(-400.0, 200.0));
        assert_eq!(normalized_to_world(Point::new(100.0, 100.0), size), Vec2::new(400.0, -200.0));
    }
}

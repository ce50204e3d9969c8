//! Loop closure for free-form polygons
//!
//! The operator closes a hand-drawn region by clicking close to the first
//! vertex instead of pressing a separate "finish" control.

use crate::core::errors::{EditError, EditResult};
use crate::editing::point_set::{PointSet, MIN_CLOSED_VERTICES};
use bevy::log::debug;
use kurbo::Point;

/// Default closure distance in normalized units (2% of the surface)
pub const DEFAULT_CLOSE_THRESHOLD: f64 = 2.0;

/// What happened to a candidate vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The candidate became a new vertex at this index
    Appended(usize),
    /// The candidate closed the loop and was discarded
    Closed,
}

/// Decides whether a placement closes the polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopDetector {
    threshold: f64,
}

impl Default for LoopDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_THRESHOLD)
    }
}

impl LoopDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether placing `candidate` would close the polygon.
    ///
    /// Only polygons with at least three vertices can close, so a second
    /// click near the first point never yields a degenerate shape.
    pub fn closes(&self, set: &PointSet, candidate: Point) -> bool {
        if set.len() < MIN_CLOSED_VERTICES {
            return false;
        }
        set.first()
            .is_some_and(|first| first.distance(candidate) < self.threshold)
    }

    /// Place a candidate vertex, closing the loop instead when it lands near
    /// the first vertex. A closed polygon accepts no placement at all.
    pub fn place(&self, set: &mut PointSet, candidate: Point) -> EditResult<Placement> {
        if set.is_closed() {
            return Err(EditError::invalid("place", "polygon is closed"));
        }
        if self.closes(set, candidate) {
            set.close()?;
            debug!("Polygon closed with {} vertices", set.len());
            return Ok(Placement::Closed);
        }
        let index = set.append(candidate)?;
        Ok(Placement::Appended(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_triangle() -> PointSet {
        let mut set = PointSet::polygon();
        for (x, y) in [(10.0, 10.0), (90.0, 10.0), (90.0, 90.0)] {
            set.append(Point::new(x, y)).unwrap();
        }
        set
    }

    #[test]
    fn click_near_start_closes_without_appending() {
        let mut set = open_triangle();
        let placement = LoopDetector::default()
            .place(&mut set, Point::new(11.0, 11.0))
            .unwrap();
        assert_eq!(placement, Placement::Closed);
        assert!(set.is_closed());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn click_far_from_start_appends() {
        let mut set = open_triangle();
        let placement = LoopDetector::default()
            .place(&mut set, Point::new(50.0, 50.0))
            .unwrap();
        assert_eq!(placement, Placement::Appended(3));
        assert!(!set.is_closed());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn two_points_never_close() {
        let mut set = PointSet::polygon();
        set.append(Point::new(10.0, 10.0)).unwrap();
        set.append(Point::new(60.0, 10.0)).unwrap();

        let placement = LoopDetector::default()
            .place(&mut set, Point::new(10.5, 10.5))
            .unwrap();
        assert_eq!(placement, Placement::Appended(2));
        assert!(!set.is_closed());
    }

    #[test]
    fn threshold_is_exclusive() {
        let set = open_triangle();
        let detector = LoopDetector::default();
        assert!(!detector.closes(&set, Point::new(12.0, 10.0)));
        assert!(detector.closes(&set, Point::new(11.99, 10.0)));
    }

    #[test]
    fn closed_polygon_rejects_placement() {
        let mut set = open_triangle();
        set.close().unwrap();
        let detector = LoopDetector::default();
        for candidate in [Point::new(40.0, 60.0), Point::new(11.0, 11.0)] {
            let err = detector.place(&mut set, candidate).unwrap_err();
            assert!(err.is_invalid_operation());
        }
        assert!(set.is_closed());
        assert_eq!(set.len(), 3);
    }
}

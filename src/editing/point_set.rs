//! Ordered point storage with a fixed cardinality policy
//!
//! A [`PointSet`] is either an open-ended polygon (points are appended and
//! removed by index) or a quadrilateral that always holds exactly four
//! points whose positions change but whose addressing never does.

use crate::core::errors::{EditError, EditResult};
use crate::geometry::point::clamp_to_surface;
use crate::geometry::{Corner, Quad};
use kurbo::Point;

/// Minimum number of vertices a closed polygon keeps
pub const MIN_CLOSED_VERTICES: usize = 3;

/// Number of points in a quad
pub const QUAD_LEN: usize = 4;

/// How many points a set holds, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityPolicy {
    /// Zero or more points; order defines the edge sequence
    Polygon,
    /// Exactly four points
    Quad,
}

/// Stable reference to a point inside a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRef {
    Index(usize),
    Corner(Corner),
}

impl PointRef {
    pub fn index(self) -> usize {
        match self {
            PointRef::Index(i) => i,
            PointRef::Corner(corner) => corner.index(),
        }
    }
}

/// Ordered normalized points plus the polygon closed flag
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    policy: CardinalityPolicy,
    points: Vec<Point>,
    closed: bool,
}

impl PointSet {
    /// An empty, open polygon
    pub fn polygon() -> Self {
        Self {
            policy: CardinalityPolicy::Polygon,
            points: Vec::new(),
            closed: false,
        }
    }

    /// A polygon seeded from saved points.
    ///
    /// A restored polygon with enough vertices counts as already closed.
    pub fn restored_polygon(points: Vec<Point>) -> Self {
        let closed = points.len() >= MIN_CLOSED_VERTICES;
        Self {
            policy: CardinalityPolicy::Polygon,
            points: points.into_iter().map(clamp_to_surface).collect(),
            closed,
        }
    }

    /// A quad from four points in addressing order; positions are clamped
    pub fn quad(points: [Point; QUAD_LEN]) -> Self {
        Self {
            policy: CardinalityPolicy::Quad,
            points: points.into_iter().map(clamp_to_surface).collect(),
            closed: false,
        }
    }

    /// A quad addressed by corner role
    pub fn quad_from_corners(quad: Quad) -> Self {
        Self::quad(quad.to_role_array())
    }

    pub fn policy(&self) -> CardinalityPolicy {
        self.policy
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current points in order
    pub fn all(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, point: PointRef) -> Option<Point> {
        self.points.get(point.index()).copied()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The four corners when this is a role-addressed quad
    pub fn corners(&self) -> Option<Quad> {
        match self.policy {
            CardinalityPolicy::Quad => Quad::from_role_slice(&self.points),
            CardinalityPolicy::Polygon => None,
        }
    }

    /// Append a vertex to an open polygon
    pub fn append(&mut self, point: Point) -> EditResult<usize> {
        match self.policy {
            CardinalityPolicy::Quad => {
                return Err(EditError::invalid("append", "quad holds exactly four points"))
            }
            CardinalityPolicy::Polygon if self.closed => {
                return Err(EditError::invalid("append", "polygon is closed"))
            }
            CardinalityPolicy::Polygon => {}
        }
        self.points.push(clamp_to_surface(point));
        Ok(self.points.len() - 1)
    }

    /// Remove a polygon vertex; re-opens the polygon when it falls below a
    /// triangle
    pub fn remove_at(&mut self, index: usize) -> EditResult<Point> {
        if self.policy == CardinalityPolicy::Quad {
            return Err(EditError::invalid("remove_at", "quad holds exactly four points"));
        }
        if index >= self.points.len() {
            return Err(EditError::NoSuchPoint {
                index,
                len: self.points.len(),
            });
        }
        let removed = self.points.remove(index);
        if self.points.len() < MIN_CLOSED_VERTICES {
            self.closed = false;
        }
        Ok(removed)
    }

    /// Move an existing point, clamping it onto the surface.
    ///
    /// Returns the clamped position actually stored.
    pub fn set_at(&mut self, point: PointRef, position: Point) -> EditResult<Point> {
        if let (PointRef::Corner(_), CardinalityPolicy::Polygon) = (point, self.policy) {
            return Err(EditError::invalid("set_at", "polygon vertices have no corner roles"));
        }
        let index = point.index();
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(EditError::NoSuchPoint { index, len })?;
        *slot = clamp_to_surface(position);
        Ok(*slot)
    }

    /// Mark the polygon closed; requires at least a triangle
    pub fn close(&mut self) -> EditResult<()> {
        if self.policy == CardinalityPolicy::Quad {
            return Err(EditError::invalid("close", "quads are always closed shapes"));
        }
        if self.points.len() < MIN_CLOSED_VERTICES {
            return Err(EditError::invalid("close", "polygon needs at least three vertices"));
        }
        self.closed = true;
        Ok(())
    }

    /// Remove every vertex and re-open the polygon
    pub fn clear(&mut self) -> EditResult<()> {
        if self.policy == CardinalityPolicy::Quad {
            return Err(EditError::invalid("clear", "quad holds exactly four points"));
        }
        self.points.clear();
        self.closed = false;
        Ok(())
    }

    /// Index of the point nearest to `position` within `radius`.
    ///
    /// Ties go to the earlier point so the first vertex wins when handles
    /// overlap.
    pub fn hit_test(&self, position: Point, radius: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, point) in self.points.iter().enumerate() {
            let distance = point.distance(position);
            if distance > radius {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PointSet {
        let mut set = PointSet::polygon();
        for (x, y) in [(10.0, 10.0), (90.0, 10.0), (90.0, 90.0)] {
            set.append(Point::new(x, y)).unwrap();
        }
        set
    }

    fn square_quad() -> PointSet {
        PointSet::quad([
            Point::new(20.0, 20.0),
            Point::new(80.0, 20.0),
            Point::new(80.0, 80.0),
            Point::new(20.0, 80.0),
        ])
    }

    #[test]
    fn quad_refuses_append_and_remove() {
        let mut set = square_quad();
        let err = set.append(Point::new(50.0, 50.0)).unwrap_err();
        assert!(err.is_invalid_operation());
        let err = set.remove_at(0).unwrap_err();
        assert!(err.is_invalid_operation());
        assert_eq!(set.len(), QUAD_LEN);
    }

    #[test]
    fn closed_polygon_refuses_append() {
        let mut set = triangle();
        set.close().unwrap();
        assert!(set.append(Point::new(5.0, 5.0)).unwrap_err().is_invalid_operation());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn removing_below_triangle_reopens() {
        let mut set = triangle();
        set.close().unwrap();
        assert!(set.is_closed());

        set.remove_at(1).unwrap();
        assert!(!set.is_closed());
        assert_eq!(set.all(), &[Point::new(10.0, 10.0), Point::new(90.0, 90.0)]);
    }

    #[test]
    fn removing_from_larger_polygon_stays_closed() {
        let mut set = triangle();
        set.append(Point::new(10.0, 90.0)).unwrap();
        set.close().unwrap();
        set.remove_at(3).unwrap();
        assert!(set.is_closed());
    }

    #[test]
    fn remove_out_of_range_is_reported() {
        let mut set = triangle();
        assert_eq!(set.remove_at(7), Err(EditError::NoSuchPoint { index: 7, len: 3 }));
    }

    #[test]
    fn set_at_clamps() {
        let mut set = square_quad();
        let stored = set.set_at(PointRef::Index(2), Point::new(130.0, -20.0)).unwrap();
        assert_eq!(stored, Point::new(100.0, 0.0));
        assert_eq!(set.get(PointRef::Index(2)), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn corner_refs_address_role_order() {
        let mut set = PointSet::quad_from_corners(Quad::new(
            Point::new(15.0, 15.0),
            Point::new(85.0, 15.0),
            Point::new(15.0, 85.0),
            Point::new(85.0, 85.0),
        ));
        set.set_at(PointRef::Corner(Corner::BottomLeft), Point::new(5.0, 95.0))
            .unwrap();
        assert_eq!(set.corners().unwrap().bottom_left, Point::new(5.0, 95.0));
        assert_eq!(set.all()[2], Point::new(5.0, 95.0));
    }

    #[test]
    fn restored_polygon_is_closed_from_three_points() {
        let set = PointSet::restored_polygon(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
        assert!(!set.is_closed());
        let set = PointSet::restored_polygon(triangle().all().to_vec());
        assert!(set.is_closed());
    }

    #[test]
    fn hit_test_prefers_nearest() {
        let set = triangle();
        assert_eq!(set.hit_test(Point::new(89.0, 11.0), 3.0), Some(1));
        assert_eq!(set.hit_test(Point::new(50.0, 50.0), 3.0), None);
    }
}

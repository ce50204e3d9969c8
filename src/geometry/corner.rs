//! Corner roles for four-point shapes
//!
//! Quad-based editors address their points either by index or by the role a
//! point plays in the quadrilateral:
//!
//! ```text
//! TopLeft ---------- TopRight
//!    |                  |
//!    |                  |
//! BottomLeft ------- BottomRight
//! ```
//!
//! Roles are labels, not constraints: a dragged "top left" corner may end up
//! anywhere on the surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One of the four roles a quadrilateral corner can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All roles in storage order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this role inside a role-addressed point set
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }

    /// Inverse of [`Corner::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable label shown next to the handle
    pub fn label(self) -> &'static str {
        match self {
            Corner::TopLeft => "top left",
            Corner::TopRight => "top right",
            Corner::BottomLeft => "bottom left",
            Corner::BottomRight => "bottom right",
        }
    }
}

/// Four named corners of a (possibly warped) quadrilateral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Build from points stored in role order (see [`Corner::index`])
    pub fn from_role_slice(points: &[Point]) -> Option<Self> {
        match points {
            [tl, tr, bl, br] => Some(Self::new(*tl, *tr, *bl, *br)),
            _ => None,
        }
    }

    /// Corners in role order
    pub fn to_role_array(self) -> [Point; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }

    pub fn get(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Corners in drawing order (clockwise), for outlining the shape
    pub fn outline(&self) -> [Point; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_index_round_trips() {
        for corner in Corner::ALL {
            assert_eq!(Corner::from_index(corner.index()), Some(corner));
        }
        assert_eq!(Corner::from_index(4), None);
    }

    #[test]
    fn quad_outline_is_clockwise() {
        let quad = Quad::new(
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(10.0, 90.0),
            Point::new(90.0, 90.0),
        );
        assert_eq!(
            quad.outline(),
            [
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(90.0, 90.0),
                Point::new(10.0, 90.0),
            ]
        );
        assert_eq!(quad.get(Corner::BottomLeft), Point::new(10.0, 90.0));
    }

    #[test]
    fn quad_serializes_with_role_names() {
        let quad = Quad::new(
            Point::new(15.0, 15.0),
            Point::new(85.0, 15.0),
            Point::new(15.0, 85.0),
            Point::new(85.0, 85.0),
        );
        let json = serde_json::to_value(quad).unwrap();
        assert_eq!(json["topLeft"]["x"], 15.0);
        assert_eq!(json["bottomRight"]["y"], 85.0);
    }
}

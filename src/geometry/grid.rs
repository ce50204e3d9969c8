//! Bilinear grid projection
//!
//! Derives a lattice of line segments from the four corners of a
//! quadrilateral by interpolating linearly along opposite edges. When the
//! corners are not axis-aligned the lattice looks like a grid seen in
//! perspective, but this is only a visual approximation: there is no
//! homogeneous-coordinate correction, so spacing stays uniform along each
//! edge.

use super::corner::Quad;
use kurbo::Line;

/// Smallest allowed number of grid cells per axis
pub const MIN_RESOLUTION: u32 = 1;

/// Largest allowed number of grid cells per axis
pub const MAX_RESOLUTION: u32 = 200;

/// Number of cells along each axis of the grid (at least one)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridResolution(u32);

impl GridResolution {
    /// Create a resolution, clamping into the supported range
    pub fn new(cells: u32) -> Self {
        Self(cells.clamp(MIN_RESOLUTION, MAX_RESOLUTION))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        Self(20)
    }
}

/// Segments making up a projected grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Lines running from the top edge to the bottom edge
    pub vertical: Vec<Line>,
    /// Lines running from the left edge to the right edge
    pub horizontal: Vec<Line>,
}

impl GridLines {
    /// All segments, vertical lines first
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.vertical.iter().chain(self.horizontal.iter())
    }

    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project a `resolution × resolution` grid onto the quadrilateral.
///
/// For each `i` in `0..=resolution` with `t = i / resolution`, the vertical
/// line runs from `lerp(TL, TR, t)` to `lerp(BL, BR, t)` and the horizontal
/// line from `lerp(TL, BL, t)` to `lerp(TR, BR, t)`. Degenerate corners are
/// accepted; the resulting segments may overlap or have zero length.
pub fn project_grid(quad: &Quad, resolution: GridResolution) -> GridLines {
    let cells = resolution.get();
    let steps = cells as f64;
    let count = cells as usize + 1;

    let mut lines = GridLines {
        vertical: Vec::with_capacity(count),
        horizontal: Vec::with_capacity(count),
    };

    for i in 0..=cells {
        let t = i as f64 / steps;
        lines.vertical.push(Line::new(
            quad.top_left.lerp(quad.top_right, t),
            quad.bottom_left.lerp(quad.bottom_right, t),
        ));
        lines.horizontal.push(Line::new(
            quad.top_left.lerp(quad.bottom_left, t),
            quad.top_right.lerp(quad.bottom_right, t),
        ));
    }

    lines
}

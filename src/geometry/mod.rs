//! Geometric Primitives and Operations
//!
//! Everything here works in normalized surface coordinates: `x` and `y` are
//! percentages (0–100) of the viewing surface's width and height.

pub mod corner;
pub mod grid;
pub mod point;
pub mod utilities;

// Re-export commonly used items
pub use corner::{Corner, Quad};
pub use grid::{project_grid, GridLines, GridResolution};
pub use point::{clamp_to_surface, is_on_surface, SURFACE_MAX, SURFACE_MIN};
pub use utilities::{cursor_to_normalized, normalized_to_world};

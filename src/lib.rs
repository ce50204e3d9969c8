//! Zona
//!
//! Interactive planar-geometry editing over a normalized video surface:
//! region-of-interest masks, perspective quads and calibration grids.
pub mod core;
pub mod editing;
pub mod geometry;
pub mod io;
pub mod logging;
pub mod modes;
pub mod rendering;
pub mod systems;

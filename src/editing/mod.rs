//! Editing Functionality
//!
//! This module contains the planar-geometry editor core:
//! - Point sets with polygon or fixed-quad cardinality
//! - Gesture handling for placing, dragging and deleting points
//! - Loop closure for free-form polygons
//! - Editor surfaces composing the above with a render model

pub mod gesture;
pub mod loop_closure;
pub mod point_set;
pub mod render_model;
pub mod style;
pub mod surface;

// Re-export commonly used items
pub use gesture::{GestureController, GestureOutcome, InteractionMode, PointerButton, PointerEvent};
pub use loop_closure::{LoopDetector, Placement};
pub use point_set::{CardinalityPolicy, PointRef, PointSet};
pub use render_model::{HandleMarker, Primitive, RenderModel};
pub use style::{GridAttributes, GridStyle, Paint, Rgb, Stroke};
pub use surface::{EditorSurface, EditorVariant, SaveEffect, SurfaceChange};

//! Render model handed to the drawing collaborator
//!
//! Primitives are listed back to front in normalized coordinates. Nothing
//! here knows about pixels except handle radii and stroke widths, which are
//! screen-space sizes by nature.

use crate::editing::style::{Paint, Stroke};
use kurbo::{Line, Point};

/// A single drawable element
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Closed shape through `points`
    Polygon {
        points: Vec<Point>,
        fill: Option<Paint>,
        stroke: Stroke,
    },
    /// Open path through `points`
    Polyline { points: Vec<Point>, stroke: Stroke },
    Segment { line: Line, stroke: Stroke },
    /// Draggable or clickable point marker
    Handle(HandleMarker),
}

/// Marker drawn at a point the operator can interact with
#[derive(Debug, Clone, PartialEq)]
pub struct HandleMarker {
    pub center: Point,
    /// Radius in logical pixels
    pub radius: f32,
    pub fill: Paint,
    pub outline: Option<Paint>,
    pub label: Option<String>,
    /// Currently grabbed
    pub active: bool,
}

/// Everything the surface wants drawn this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    pub primitives: Vec<Primitive>,
}

impl RenderModel {
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn handles(&self) -> impl Iterator<Item = &HandleMarker> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Handle(handle) => Some(handle),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = (&Line, &Stroke)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Segment { line, stroke } => Some((line, stroke)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

//! Pointer gesture handling
//!
//! The [`GestureController`] turns a serialized stream of pointer events into
//! point-set mutations. Every event is applied immediately and in arrival
//! order; there is no batching and no separate commit step, so a drag that is
//! released has already written its last position.

use crate::editing::loop_closure::{LoopDetector, Placement};
use crate::editing::point_set::{CardinalityPolicy, PointRef, PointSet};
use crate::geometry::point::limit_translation;
use crate::geometry::Corner;
use bevy::log::debug;
use kurbo::{Point, Vec2};

/// Default handle hit radius in normalized units
pub const DEFAULT_HIT_RADIUS: f64 = 2.5;

/// Which button produced a pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    /// Contextual click (right button on a mouse)
    Secondary,
}

/// A pointer event in normalized surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point, button: PointerButton },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the surface; treated exactly like a release
    Leave,
}

impl PointerEvent {
    pub fn primary_down(x: f64, y: f64) -> Self {
        Self::Down {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn secondary_down(x: f64, y: f64) -> Self {
        Self::Down {
            position: Point::new(x, y),
            button: PointerButton::Secondary,
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::Up {
            position: Point::new(x, y),
        }
    }
}

/// What the pointer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// A vertex was just placed and the button is still held; moves are
    /// ignored (click-to-place, not drag-to-place)
    PlacingPoint,
    DraggingPoint(PointRef),
    /// Whole-shape drag; `offset` is the cursor position of the last applied
    /// move
    DraggingWhole { offset: Point },
}

impl InteractionMode {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingPoint(_) | Self::DraggingWhole { .. })
    }
}

/// How quad points are addressed by drags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    Index,
    Corner,
}

/// Result of handling one event, used by the surface to emit notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing changed
    Ignored,
    Placed(usize),
    Closed,
    Grabbed(PointRef),
    GrabbedWhole,
    Moved(PointRef, Point),
    Translated(Vec2),
    Removed(usize),
    Released,
}

impl GestureOutcome {
    /// Whether point positions or membership changed
    pub fn mutated_points(&self) -> bool {
        matches!(
            self,
            Self::Placed(_) | Self::Closed | Self::Moved(..) | Self::Translated(_) | Self::Removed(_)
        )
    }
}

/// Interprets pointer events against a point set
#[derive(Debug, Clone)]
pub struct GestureController {
    mode: InteractionMode,
    hit_radius: f64,
    addressing: Addressing,
    placement: Option<LoopDetector>,
    drag_points: bool,
    drag_whole: bool,
    handles_enabled: bool,
}

impl GestureController {
    /// Free-form polygon entry: click to place, right-click to delete
    pub fn for_polygon(loop_detector: LoopDetector) -> Self {
        Self {
            mode: InteractionMode::Idle,
            hit_radius: DEFAULT_HIT_RADIUS,
            addressing: Addressing::Index,
            placement: Some(loop_detector),
            drag_points: false,
            drag_whole: false,
            handles_enabled: true,
        }
    }

    /// Fixed four-point shape with draggable corners
    pub fn for_quad(addressing: Addressing) -> Self {
        Self {
            mode: InteractionMode::Idle,
            hit_radius: DEFAULT_HIT_RADIUS,
            addressing,
            placement: None,
            drag_points: true,
            drag_whole: false,
            handles_enabled: true,
        }
    }

    pub fn with_hit_radius(mut self, radius: f64) -> Self {
        self.hit_radius = radius.max(0.0);
        self
    }

    /// Allow dragging existing vertices (always on for quads)
    pub fn with_point_drag(mut self, enabled: bool) -> Self {
        self.drag_points = enabled;
        self
    }

    /// Allow dragging the whole shape from anywhere off its handles
    pub fn with_whole_drag(mut self, enabled: bool) -> Self {
        self.drag_whole = enabled;
        self
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    pub fn handles_enabled(&self) -> bool {
        self.handles_enabled
    }

    /// Hidden handles cannot be grabbed
    pub fn set_handles_enabled(&mut self, enabled: bool) {
        self.handles_enabled = enabled;
        if !enabled && matches!(self.mode, InteractionMode::DraggingPoint(_)) {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Forget any gesture in progress
    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    /// Apply one pointer event
    pub fn handle(&mut self, event: PointerEvent, set: &mut PointSet) -> GestureOutcome {
        match event {
            PointerEvent::Down {
                position,
                button: PointerButton::Primary,
            } => self.primary_down(position, set),
            PointerEvent::Down {
                position,
                button: PointerButton::Secondary,
            } => self.secondary_down(position, set),
            PointerEvent::Move { position } => self.pointer_move(position, set),
            PointerEvent::Up { .. } | PointerEvent::Leave => self.release(),
        }
    }

    fn primary_down(&mut self, position: Point, set: &mut PointSet) -> GestureOutcome {
        if self.mode != InteractionMode::Idle {
            debug!("Ignoring press while {:?}", self.mode);
            return GestureOutcome::Ignored;
        }

        // A loop-closing click takes priority over grabbing the first vertex
        if let Some(detector) = self.placement {
            if !set.is_closed() && detector.closes(set, position) {
                return self.place(detector, position, set);
            }
        }

        if let Some(point) = self.grab_target(position, set) {
            self.mode = InteractionMode::DraggingPoint(point);
            debug!("Started dragging {:?}", point);
            return GestureOutcome::Grabbed(point);
        }

        if let Some(detector) = self.placement {
            return self.place(detector, position, set);
        }

        if self.drag_whole {
            self.mode = InteractionMode::DraggingWhole { offset: position };
            debug!("Started whole-shape drag at ({:.1}, {:.1})", position.x, position.y);
            return GestureOutcome::GrabbedWhole;
        }

        GestureOutcome::Ignored
    }

    fn place(&mut self, detector: LoopDetector, position: Point, set: &mut PointSet) -> GestureOutcome {
        match detector.place(set, position) {
            Ok(Placement::Appended(index)) => {
                self.mode = InteractionMode::PlacingPoint;
                GestureOutcome::Placed(index)
            }
            Ok(Placement::Closed) => GestureOutcome::Closed,
            Err(e) => {
                debug!("Placement suppressed: {}", e);
                GestureOutcome::Ignored
            }
        }
    }

    fn grab_target(&self, position: Point, set: &PointSet) -> Option<PointRef> {
        if !self.drag_points || !self.handles_enabled {
            return None;
        }
        let index = set.hit_test(position, self.hit_radius)?;
        match (self.addressing, set.policy()) {
            (Addressing::Corner, CardinalityPolicy::Quad) => Corner::from_index(index).map(PointRef::Corner),
            _ => Some(PointRef::Index(index)),
        }
    }

    fn secondary_down(&mut self, position: Point, set: &mut PointSet) -> GestureOutcome {
        if set.policy() != CardinalityPolicy::Polygon {
            return GestureOutcome::Ignored;
        }
        let Some(index) = set.hit_test(position, self.hit_radius) else {
            return GestureOutcome::Ignored;
        };
        match set.remove_at(index) {
            Ok(_) => {
                self.retarget_after_removal(index);
                debug!("Removed vertex {}, {} left", index, set.len());
                GestureOutcome::Removed(index)
            }
            Err(e) => {
                debug!("Removal suppressed: {}", e);
                GestureOutcome::Ignored
            }
        }
    }

    /// Keep an in-flight vertex drag pointing at the same vertex after an
    /// earlier one was removed; a drag of the removed vertex itself ends.
    fn retarget_after_removal(&mut self, removed: usize) {
        if let InteractionMode::DraggingPoint(PointRef::Index(dragged)) = self.mode {
            if dragged == removed {
                self.mode = InteractionMode::Idle;
            } else if dragged > removed {
                self.mode = InteractionMode::DraggingPoint(PointRef::Index(dragged - 1));
            }
        }
    }

    fn pointer_move(&mut self, position: Point, set: &mut PointSet) -> GestureOutcome {
        match self.mode {
            InteractionMode::DraggingPoint(point) => match set.set_at(point, position) {
                Ok(stored) => GestureOutcome::Moved(point, stored),
                Err(e) => {
                    debug!("Drag move suppressed: {}", e);
                    GestureOutcome::Ignored
                }
            },
            InteractionMode::DraggingWhole { offset } => {
                let delta = limit_translation(set.all(), position - offset);
                // Offset follows the cursor so successive moves add up
                self.mode = InteractionMode::DraggingWhole { offset: position };
                if delta == Vec2::ZERO {
                    return GestureOutcome::Ignored;
                }
                let moved: Vec<Point> = set.all().iter().map(|p| *p + delta).collect();
                for (index, point) in moved.into_iter().enumerate() {
                    if let Err(e) = set.set_at(PointRef::Index(index), point) {
                        debug!("Translate suppressed: {}", e);
                    }
                }
                GestureOutcome::Translated(delta)
            }
            InteractionMode::Idle | InteractionMode::PlacingPoint => GestureOutcome::Ignored,
        }
    }

    fn release(&mut self) -> GestureOutcome {
        let was = std::mem::take(&mut self.mode);
        if was.is_dragging() {
            debug!("Released {:?}", was);
            GestureOutcome::Released
        } else {
            GestureOutcome::Ignored
        }
    }
}

//! Editor surfaces
//!
//! An [`EditorSurface`] composes a point set, a gesture controller and the
//! variant's optional capabilities (loop closure for masks, grid projection
//! for the measurement grid) into the component a host embeds:
//!
//! * feed it pointer events with [`EditorSurface::handle_pointer`],
//! * draw [`EditorSurface::render_model`] every frame,
//! * invoke [`reset`](EditorSurface::reset), [`clear`](EditorSurface::clear)
//!   and [`save`](EditorSurface::save) from explicit operator commands,
//! * drain [`changes`](EditorSurface::drain_changes) to persist grid
//!   attributes.

use crate::core::settings::palette;
use crate::editing::gesture::{Addressing, GestureController, GestureOutcome, InteractionMode, PointerEvent};
use crate::editing::loop_closure::LoopDetector;
use crate::editing::point_set::{PointSet, QUAD_LEN};
use crate::editing::render_model::{HandleMarker, Primitive, RenderModel};
use crate::editing::style::{default_grid_corners, GridAttributes, GridStyle, Rgb, Stroke};
use crate::geometry::{project_grid, Corner, GridResolution, Quad};
use crate::io::submission::{PointSubmitter, SubmitTarget};
use bevy::log::{debug, info, warn};
use kurbo::{Line, Point};

/// Default perspective quad, in index order TL, TR, BR, BL
pub const PERSPECTIVE_DEFAULT: [Point; QUAD_LEN] = [
    Point::new(20.0, 20.0),
    Point::new(80.0, 20.0),
    Point::new(80.0, 80.0),
    Point::new(20.0, 80.0),
];

/// The three editor forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorVariant {
    /// Free-form region-of-interest polygon
    Mask,
    /// Four index-addressed calibration corners
    Perspective,
    /// Four role-addressed corners with a projected grid
    Grid,
}

impl EditorVariant {
    pub fn name(self) -> &'static str {
        match self {
            EditorVariant::Mask => "Mask",
            EditorVariant::Perspective => "Perspective",
            EditorVariant::Grid => "Grid",
        }
    }

    /// Where `save` sends the points
    pub fn submit_target(self) -> SubmitTarget {
        match self {
            EditorVariant::Mask => SubmitTarget::Roi,
            EditorVariant::Perspective | EditorVariant::Grid => SubmitTarget::Calibration,
        }
    }

    /// Whether saving hands control back to the live view
    pub fn returns_to_live_on_save(self) -> bool {
        matches!(self, EditorVariant::Mask | EditorVariant::Perspective)
    }
}

/// Attribute change the host should persist
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceChange {
    Corners(Quad),
    Resolution(GridResolution),
    Color(Rgb),
    Opacity(f32),
}

/// What a save asks of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveEffect {
    pub target: SubmitTarget,
    pub points_saved: usize,
    /// The host should switch back to the live view
    pub return_to_live: bool,
}

/// Interactive planar-geometry editor
#[derive(Debug, Clone)]
pub struct EditorSurface {
    variant: EditorVariant,
    points: PointSet,
    gestures: GestureController,
    grid: Option<GridStyle>,
    active: bool,
    changes: Vec<SurfaceChange>,
}

impl EditorSurface {
    /// Empty mask polygon
    pub fn mask() -> Self {
        Self::mask_with(PointSet::polygon())
    }

    /// Mask seeded from saved vertices; three or more count as closed
    pub fn mask_restored(points: Vec<Point>) -> Self {
        Self::mask_with(PointSet::restored_polygon(points))
    }

    fn mask_with(points: PointSet) -> Self {
        Self {
            variant: EditorVariant::Mask,
            points,
            gestures: GestureController::for_polygon(LoopDetector::default()),
            grid: None,
            active: true,
            changes: Vec::new(),
        }
    }

    /// Perspective quad at its default position
    pub fn perspective() -> Self {
        Self {
            variant: EditorVariant::Perspective,
            points: PointSet::quad(PERSPECTIVE_DEFAULT),
            gestures: GestureController::for_quad(Addressing::Index),
            grid: None,
            active: true,
            changes: Vec::new(),
        }
    }

    /// Perspective quad seeded from saved points when there are exactly four
    pub fn perspective_restored(points: &[Point]) -> Self {
        let mut surface = Self::perspective();
        match <[Point; QUAD_LEN]>::try_from(points) {
            Ok(quad) => surface.points = PointSet::quad(quad),
            Err(_) => warn!(
                "Ignoring saved perspective with {} points, expected {}",
                points.len(),
                QUAD_LEN
            ),
        }
        surface
    }

    /// Measurement grid from persisted attributes
    pub fn grid(attributes: GridAttributes) -> Self {
        let mut gestures = GestureController::for_quad(Addressing::Corner).with_whole_drag(true);
        gestures.set_handles_enabled(attributes.style.show_corners);
        Self {
            variant: EditorVariant::Grid,
            points: PointSet::quad_from_corners(attributes.corners),
            gestures,
            grid: Some(attributes.style),
            active: true,
            changes: Vec::new(),
        }
    }

    pub fn with_hit_radius(mut self, radius: f64) -> Self {
        self.gestures = self.gestures.with_hit_radius(radius);
        self
    }

    /// Let mask vertices be dragged after placement
    pub fn with_vertex_drag(mut self, enabled: bool) -> Self {
        if self.variant == EditorVariant::Mask {
            self.gestures = self.gestures.with_point_drag(enabled);
        }
        self
    }

    pub fn variant(&self) -> EditorVariant {
        self.variant
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn mode(&self) -> InteractionMode {
        self.gestures.mode()
    }

    pub fn is_closed(&self) -> bool {
        self.points.is_closed()
    }

    pub fn grid_style(&self) -> Option<&GridStyle> {
        self.grid.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive surfaces ignore pointer input and render nothing
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.gestures.reset();
        }
    }

    /// Apply one pointer event; the render model reflects it immediately
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        let outcome = self.gestures.handle(event, &mut self.points);
        if outcome.mutated_points() {
            self.note_corners_changed();
        }
        outcome
    }

    /// Restore the variant's default points and forget any gesture
    pub fn reset(&mut self) {
        self.gestures.reset();
        self.points = match self.variant {
            EditorVariant::Mask => PointSet::polygon(),
            EditorVariant::Perspective => PointSet::quad(PERSPECTIVE_DEFAULT),
            EditorVariant::Grid => PointSet::quad_from_corners(default_grid_corners()),
        };
        info!("{} editor reset", self.variant.name());
        self.note_corners_changed();
    }

    /// Remove every mask vertex; returns whether anything was cleared
    pub fn clear(&mut self) -> bool {
        match self.points.clear() {
            Ok(()) => {
                self.gestures.reset();
                info!("{} editor cleared", self.variant.name());
                true
            }
            Err(e) => {
                debug!("Clear suppressed: {}", e);
                false
            }
        }
    }

    /// Hand the current points to the submitter
    pub fn save(&self, submitter: &dyn PointSubmitter) -> SaveEffect {
        let target = self.variant.submit_target();
        let points = self.saved_points();
        submitter.submit(target, &points);
        info!("{} saved with {} points", self.variant.name(), points.len());
        SaveEffect {
            target,
            points_saved: points.len(),
            return_to_live: self.variant.returns_to_live_on_save(),
        }
    }

    /// Points in submission order. Grid corners go out as a perimeter
    /// (TL, TR, BR, BL), the same order as the perspective quad.
    pub fn saved_points(&self) -> Vec<Point> {
        match (self.variant, self.points.corners()) {
            (EditorVariant::Grid, Some(quad)) => quad.outline().to_vec(),
            _ => self.points.all().to_vec(),
        }
    }

    /// Change the grid resolution by `steps` within the operator range
    pub fn step_grid_resolution(&mut self, steps: i32) {
        if let Some(style) = self.grid.as_mut() {
            if style.step_resolution(steps) {
                let resolution = style.resolution;
                self.changes.push(SurfaceChange::Resolution(resolution));
            }
        }
    }

    pub fn step_grid_opacity(&mut self, steps: i32) {
        if let Some(style) = self.grid.as_mut() {
            if style.step_opacity(steps) {
                let opacity = style.opacity;
                self.changes.push(SurfaceChange::Opacity(opacity));
            }
        }
    }

    pub fn set_grid_color(&mut self, color: Rgb) {
        if let Some(style) = self.grid.as_mut() {
            if style.color != color {
                style.color = color;
                self.changes.push(SurfaceChange::Color(color));
            }
        }
    }

    /// Show or hide the grid corner handles; hidden handles cannot be dragged
    pub fn toggle_grid_corners(&mut self) {
        if let Some(style) = self.grid.as_mut() {
            style.show_corners = !style.show_corners;
            self.gestures.set_handles_enabled(style.show_corners);
            debug!("Grid corners visible: {}", style.show_corners);
        }
    }

    /// Take the attribute changes accumulated since the last call
    pub fn drain_changes(&mut self) -> Vec<SurfaceChange> {
        std::mem::take(&mut self.changes)
    }

    fn note_corners_changed(&mut self) {
        if self.variant != EditorVariant::Grid {
            return;
        }
        if let Some(quad) = self.points.corners() {
            // Only the latest corner positions matter to the store
            self.changes.retain(|c| !matches!(c, SurfaceChange::Corners(_)));
            self.changes.push(SurfaceChange::Corners(quad));
        }
    }

    /// Build the primitives to draw, back to front
    pub fn render_model(&self) -> RenderModel {
        let mut model = RenderModel::default();
        if !self.active {
            return model;
        }
        match self.variant {
            EditorVariant::Mask => self.render_mask(&mut model),
            EditorVariant::Perspective => self.render_perspective(&mut model),
            EditorVariant::Grid => self.render_grid(&mut model),
        }
        model
    }

    fn dragged_index(&self) -> Option<usize> {
        match self.gestures.mode() {
            InteractionMode::DraggingPoint(point) => Some(point.index()),
            _ => None,
        }
    }

    fn render_mask(&self, model: &mut RenderModel) {
        let points = self.points.all();
        if points.is_empty() {
            return;
        }
        model.push(Primitive::Polygon {
            points: points.to_vec(),
            fill: Some(palette::MASK_FILL),
            stroke: Stroke::solid(palette::MASK_STROKE, 2.0),
        });
        if !self.points.is_closed() {
            model.push(Primitive::Polyline {
                points: points.to_vec(),
                stroke: Stroke::dashed(palette::MASK_STROKE, 1.0),
            });
        }
        let dragged = self.dragged_index();
        for (index, point) in points.iter().enumerate() {
            let fill = if index == 0 {
                palette::MASK_FIRST_VERTEX
            } else {
                palette::MASK_STROKE
            };
            model.push(Primitive::Handle(HandleMarker {
                center: *point,
                radius: palette::MASK_HANDLE_RADIUS,
                fill,
                outline: None,
                label: None,
                active: dragged == Some(index),
            }));
        }
    }

    fn render_perspective(&self, model: &mut RenderModel) {
        let points = self.points.all();
        model.push(Primitive::Polygon {
            points: points.to_vec(),
            fill: Some(palette::PERSPECTIVE_FILL),
            stroke: Stroke::dashed(palette::PERSPECTIVE_STROKE, 2.0),
        });
        for (index, point) in points.iter().enumerate() {
            let next = points[(index + 1) % points.len()];
            model.push(Primitive::Segment {
                line: Line::new(*point, next),
                stroke: Stroke::solid(palette::PERSPECTIVE_STROKE, 2.0),
            });
        }
        let dragged = self.dragged_index();
        for (index, point) in points.iter().enumerate() {
            model.push(Primitive::Handle(HandleMarker {
                center: *point,
                radius: palette::PERSPECTIVE_HANDLE_RADIUS,
                fill: palette::PERSPECTIVE_STROKE,
                outline: Some(palette::HANDLE_OUTLINE),
                label: Some((index + 1).to_string()),
                active: dragged == Some(index),
            }));
        }
    }

    fn render_grid(&self, model: &mut RenderModel) {
        let (Some(style), Some(quad)) = (self.grid.as_ref(), self.points.corners()) else {
            return;
        };
        let stroke = Stroke::solid(style.line_paint(), 2.0);
        for line in project_grid(&quad, style.resolution).iter() {
            model.push(Primitive::Segment { line: *line, stroke });
        }
        if !style.show_corners {
            return;
        }
        let dragged = self.dragged_index();
        for corner in Corner::ALL {
            let active = dragged == Some(corner.index());
            let (fill, radius) = if active {
                (palette::ACTIVE_HANDLE, palette::GRID_HANDLE_ACTIVE_RADIUS)
            } else {
                (style.color.with_opacity(1.0), palette::GRID_HANDLE_RADIUS)
            };
            model.push(Primitive::Handle(HandleMarker {
                center: quad.get(corner),
                radius,
                fill,
                outline: Some(palette::HANDLE_OUTLINE),
                label: Some(corner.label().to_string()),
                active,
            }));
        }
    }

    /// Point currently referenced by an in-flight drag
    pub fn dragged_point(&self) -> Option<Point> {
        match self.gestures.mode() {
            InteractionMode::DraggingPoint(point) => self.points.get(point),
            _ => None,
        }
    }
}

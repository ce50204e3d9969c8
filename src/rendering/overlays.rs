//! Overlay rendering
//!
//! Draws the open editor's render model over the video surface. Strokes are
//! immediate-mode gizmos redrawn every frame; fills, handle discs and labels
//! are mesh and text entities respawned whenever the editor or window
//! changes.

#![allow(clippy::too_many_arguments)]

use crate::editing::{HandleMarker, Paint, Primitive, RenderModel, Stroke};
use crate::geometry::normalized_to_world;
use crate::rendering::mesh_utils::{dash_segments, disc_mesh, polygon_mesh};
use crate::systems::editor_lifecycle::ActiveEditor;
use bevy::prelude::*;
use bevy::render::mesh::Mesh2d;
use bevy::sprite::{ColorMaterial, MeshMaterial2d};
use bevy::window::{PrimaryWindow, WindowResized};
use kurbo::Point;

/// Dash length in logical pixels
const DASH_LENGTH: f32 = 8.0;
const DASH_GAP: f32 = 6.0;
const LABEL_FONT_SIZE: f32 = 14.0;
/// Label offset above its handle, in logical pixels
const LABEL_OFFSET: f32 = 18.0;

const FILL_Z: f32 = 0.0;
const HANDLE_Z: f32 = 10.0;
const LABEL_Z: f32 = 20.0;

/// Marks entities spawned for the current overlay
#[derive(Component)]
pub struct OverlayElement;

/// Convert a paint into a Bevy color
pub fn paint_color(paint: Paint) -> Color {
    Color::srgba_u8(
        paint.color.r,
        paint.color.g,
        paint.color.b,
        (paint.opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn to_world(points: &[Point], size: Vec2) -> Vec<Vec2> {
    points.iter().map(|p| normalized_to_world(*p, size)).collect()
}

fn draw_path(gizmos: &mut Gizmos, points: &[Vec2], closed: bool, stroke: &Stroke) {
    if points.len() < 2 {
        return;
    }
    let color = paint_color(stroke.paint);
    let closing = closed.then(|| (points[points.len() - 1], points[0]));
    let segments = points.windows(2).map(|w| (w[0], w[1])).chain(closing);

    if stroke.dashed {
        for (a, b) in segments {
            for (start, end) in dash_segments(a, b, DASH_LENGTH, DASH_GAP) {
                gizmos.line_2d(start, end, color);
            }
        }
    } else {
        for (a, b) in segments {
            gizmos.line_2d(a, b, color);
        }
    }
}

fn draw_handle_outline(gizmos: &mut Gizmos, handle: &HandleMarker, size: Vec2) {
    if let Some(outline) = handle.outline {
        let center = normalized_to_world(handle.center, size);
        gizmos.circle_2d(center, handle.radius, paint_color(outline));
    }
}

/// Draw every stroke of the render model with gizmos
pub fn draw_model_strokes(gizmos: &mut Gizmos, model: &RenderModel, size: Vec2) {
    for primitive in &model.primitives {
        match primitive {
            Primitive::Polygon { points, stroke, .. } => {
                draw_path(gizmos, &to_world(points, size), true, stroke);
            }
            Primitive::Polyline { points, stroke } => {
                draw_path(gizmos, &to_world(points, size), false, stroke);
            }
            Primitive::Segment { line, stroke } => {
                draw_path(gizmos, &to_world(&[line.p0, line.p1], size), false, stroke);
            }
            Primitive::Handle(handle) => draw_handle_outline(gizmos, handle, size),
        }
    }
}

/// System drawing overlay strokes each frame
pub fn draw_overlay_strokes(
    mut gizmos: Gizmos,
    editor: Res<ActiveEditor>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(surface) = editor.surface.as_ref() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    draw_model_strokes(&mut gizmos, &surface.render_model(), window.size());
}

/// System respawning fill meshes, handle discs and labels
pub fn sync_overlay_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    editor: Res<ActiveEditor>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut resized: EventReader<WindowResized>,
    existing: Query<Entity, With<OverlayElement>>,
) {
    let window_changed = resized.read().count() > 0;
    if !editor.is_changed() && !window_changed {
        return;
    }

    for entity in existing.iter() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }

    let Some(surface) = editor.surface.as_ref() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.size();

    for (order, primitive) in surface.render_model().primitives.iter().enumerate() {
        // keep primitives in model order within each layer
        let z_step = order as f32 * 0.01;
        match primitive {
            Primitive::Polygon {
                points,
                fill: Some(fill),
                ..
            } => {
                if let Some(mesh) = polygon_mesh(&to_world(points, size)) {
                    commands.spawn((
                        OverlayElement,
                        Mesh2d(meshes.add(mesh)),
                        MeshMaterial2d(materials.add(ColorMaterial::from(paint_color(*fill)))),
                        Transform::from_translation(Vec3::new(0.0, 0.0, FILL_Z + z_step)),
                    ));
                }
            }
            Primitive::Handle(handle) => {
                let center = normalized_to_world(handle.center, size);
                commands.spawn((
                    OverlayElement,
                    Mesh2d(meshes.add(disc_mesh(Vec2::ZERO, handle.radius))),
                    MeshMaterial2d(materials.add(ColorMaterial::from(paint_color(handle.fill)))),
                    Transform::from_translation(center.extend(HANDLE_Z + z_step)),
                ));
                if let Some(label) = &handle.label {
                    commands.spawn((
                        OverlayElement,
                        Text2d::new(label.clone()),
                        TextFont {
                            font_size: LABEL_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Transform::from_translation(
                            (center + Vec2::new(0.0, handle.radius + LABEL_OFFSET)).extend(LABEL_Z),
                        ),
                    ));
                }
            }
            _ => {}
        }
    }
}

//! Rendering and Visualization
//!
//! This module contains all rendering functionality:
//! - Camera setup for the overlay
//! - Gizmo strokes and mesh fills for the editor render model
//! - Mesh construction helpers

pub mod cameras;
pub mod mesh_utils;
pub mod overlays;

use crate::systems::EditorSets;
use bevy::prelude::*;

// Re-export commonly used items
pub use cameras::CameraPlugin;
pub use overlays::{draw_overlay_strokes, paint_color, sync_overlay_entities, OverlayElement};

/// Draws the open editor each frame after input has been applied
pub struct OverlayRenderingPlugin;

impl Plugin for OverlayRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_overlay_strokes, sync_overlay_entities).after(EditorSets::Input),
        );
    }
}

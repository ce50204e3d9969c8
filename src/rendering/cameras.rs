//! Camera setup
//!
//! A single 2D camera at the origin with unit scale, so world space is the
//! window in logical pixels centred on the origin.

use bevy::prelude::*;

/// Marker for the overlay camera
#[derive(Component)]
pub struct OverlayCamera;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, OverlayCamera));
    debug!("Overlay camera spawned");
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

//! Plugin management and configuration for the Zona editor
//!
//! This module organizes all the plugins and systems into logical groups,
//! making it easier to manage the application's architecture.

use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use crate::core::settings::{DEFAULT_WINDOW_SIZE, WINDOW_TITLE};
use crate::logging;
use crate::modes::{editor_is_open, ModeStatePlugin};
use crate::systems::commands::handle_keyboard_commands;
use crate::systems::editor_lifecycle::{persist_surface_changes, sync_editor_with_mode};
use crate::systems::pointer_input::forward_pointer_input;

/// Gizmo line width for overlay strokes
const GIZMO_LINE_WIDTH: f32 = 2.0;

/// Configure logging with performance optimization for release builds
pub fn configure_logging() -> LogPlugin {
    #[cfg(debug_assertions)]
    {
        // Debug builds: Show more detailed logging for development
        LogPlugin {
            level: Level::INFO,
            filter: "zona=info,bevy_render=warn,bevy_winit=warn,wgpu=warn,winit=warn,reqwest=warn,hyper=warn".to_string(),
            custom_layer: logging::file_layer,
            ..default()
        }
    }

    #[cfg(not(debug_assertions))]
    {
        // Release builds: Quieter logging, focus on warnings and errors
        LogPlugin {
            level: Level::WARN,
            filter: "zona=warn,bevy=warn,wgpu=error,winit=error,reqwest=error,hyper=error".to_string(),
            custom_layer: logging::file_layer,
            ..default()
        }
    }
}

/// Configure default Bevy plugins for the application
pub fn configure_default_plugins() -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: DEFAULT_WINDOW_SIZE.into(),
                ..default()
            }),
            ..default()
        })
        .set(configure_logging())
}

/// System to configure gizmo appearance
fn configure_gizmos(mut gizmo_store: ResMut<GizmoConfigStore>) {
    let (config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = GIZMO_LINE_WIDTH;
    debug!("Configured gizmo line width to {}px", GIZMO_LINE_WIDTH);
}

/// Ordering of the per-frame editor systems
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorSets {
    /// Build or discard the editor for the current view
    Lifecycle,
    /// Pointer and keyboard input
    Input,
    /// Write-through of persisted attributes
    Persist,
}

/// Plugin to organize setup systems
pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (configure_gizmos, logging::log_session_start));
    }
}

/// Editor input and lifecycle systems
pub struct EditorInputPlugin;

impl Plugin for EditorInputPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (EditorSets::Lifecycle, EditorSets::Input, EditorSets::Persist).chain(),
        )
        .add_systems(Update, sync_editor_with_mode.in_set(EditorSets::Lifecycle))
        .add_systems(
            Update,
            (
                forward_pointer_input.run_if(editor_is_open),
                handle_keyboard_commands,
            )
                .chain()
                .in_set(EditorSets::Input),
        )
        .add_systems(Update, persist_surface_changes.in_set(EditorSets::Persist));
    }
}

/// Main application plugin that bundles all internal plugins
pub struct ZonaSystems;

impl Plugin for ZonaSystems {
    fn build(&self, app: &mut App) {
        app.add_plugins((SetupPlugin, ModeStatePlugin, EditorInputPlugin));
    }
}

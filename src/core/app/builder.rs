//! Application builder and initialization
//!
//! This module provides the main app creation functions

use super::plugins::{CorePluginGroup, RenderingPluginGroup};
use crate::core::config::{CliArgs, ConfigFile, ZonaSettings};
use crate::core::settings::BACKGROUND_COLOR;
use crate::editing::EditorVariant;
use crate::io::{load_saved_points, HttpSubmitter, JsonFileStore};
use crate::logging::FileLogging;
use crate::modes::{ModeState, ViewMode};
use crate::systems::{configure_default_plugins, ActiveEditor, GridAttributeStore, RestoredPoints, Submitter};
use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use std::sync::Arc;

/// Creates a fully configured Zona application.
///
/// Validates the command line, resolves settings against the user config
/// file and wires the editor, persistence and submission resources before
/// any plugin is added.
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let mut app = App::new();
    configure_resources(&mut app, cli_args)?;
    configure_window_plugins(&mut app);
    add_plugin_groups(&mut app);
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_resources(app: &mut App, cli_args: CliArgs) -> Result<()> {
    let settings = ZonaSettings {
        backend_url: cli_args.get_backend_url(),
        handle_radius: cli_args.get_handle_radius(),
        mask_vertex_drag: cli_args.get_mask_vertex_drag(),
    };
    let start_mode = ViewMode::from(cli_args.get_start_mode());
    let restored = restored_points(&cli_args, start_mode)?;

    let submitter =
        HttpSubmitter::new(settings.backend_url.clone()).context("Failed to set up the backend client")?;
    let store = JsonFileStore::open(ConfigFile::attributes_path());

    app.insert_resource(FileLogging {
        enabled: !cli_args.no_log_file,
    })
    .insert_resource(cli_args)
    .insert_resource(settings)
    .insert_resource(ModeState::starting_in(start_mode))
    .insert_resource(restored)
    .insert_resource(ActiveEditor::default())
    .insert_resource(GridAttributeStore {
        store: Box::new(store),
    })
    .insert_resource(Submitter {
        submitter: Arc::new(submitter),
    })
    .insert_resource(ClearColor(BACKGROUND_COLOR));

    // In debug mode, use continuous updates for immediate feedback
    // In release mode, use reactive mode for better performance
    #[cfg(debug_assertions)]
    app.insert_resource(WinitSettings {
        focused_mode: bevy::winit::UpdateMode::Continuous,
        unfocused_mode: bevy::winit::UpdateMode::Continuous,
    });

    #[cfg(not(debug_assertions))]
    app.insert_resource(WinitSettings::desktop_app());

    Ok(())
}

/// Seed the start-up editor from `--restore`
fn restored_points(cli_args: &CliArgs, start_mode: ViewMode) -> Result<RestoredPoints> {
    let mut restored = RestoredPoints::default();
    let Some(path) = &cli_args.restore else {
        return Ok(restored);
    };

    match start_mode.editor_variant() {
        Some(variant @ (EditorVariant::Mask | EditorVariant::Perspective)) => {
            let points = load_saved_points(path)?;
            restored.remember(variant, &points);
            Ok(restored)
        }
        _ => anyhow::bail!(
            "--restore needs --mode mask or --mode perspective (start mode is {})",
            start_mode.name()
        ),
    }
}

/// Configure window and default plugins
fn configure_window_plugins(app: &mut App) {
    app.add_plugins(configure_default_plugins());
}

/// Add all plugin groups to the application
fn add_plugin_groups(app: &mut App) {
    debug!("Adding plugin groups...");
    app.add_plugins((CorePluginGroup, RenderingPluginGroup));
    debug!("All plugin groups added successfully");
}

//! Plugin group definitions for the Zona application
//!
//! Organized into logical groups for clarity and maintainability

use bevy::app::{PluginGroup, PluginGroupBuilder};

/// Plugin group for core application functionality
#[derive(Default)]
pub struct CorePluginGroup;

impl PluginGroup for CorePluginGroup {
    fn build(self) -> PluginGroupBuilder {
        use crate::systems::ZonaSystems;

        PluginGroupBuilder::start::<Self>().add(ZonaSystems)
    }
}

/// Plugin group for rendering functionality
#[derive(Default)]
pub struct RenderingPluginGroup;

impl PluginGroup for RenderingPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        use crate::rendering::{CameraPlugin, OverlayRenderingPlugin};

        PluginGroupBuilder::start::<Self>()
            .add(CameraPlugin)
            .add(OverlayRenderingPlugin)
    }
}

//! Mode state management - single source of truth for the active view
//!
//! Systems that build or tear down editors watch `just_changed` rather than
//! comparing against a cached copy of the mode.

use crate::core::cli::StartMode;
use crate::editing::EditorVariant;
use bevy::prelude::*;

/// The single source of truth for which view is currently shown
#[derive(Resource, Debug, Default)]
pub struct ModeState {
    /// Currently shown view
    pub active: ViewMode,

    /// Track if the view changed this frame (for editor lifecycle systems)
    active_changed: bool,

    previous: Option<ViewMode>,
}

impl ModeState {
    /// State for the first frame; counts as a change so the start-up editor
    /// gets built
    pub fn starting_in(mode: ViewMode) -> Self {
        Self {
            active: mode,
            active_changed: true,
            previous: None,
        }
    }

    /// Switch to a new view
    pub fn activate(&mut self, mode: ViewMode) {
        if self.active != mode {
            self.previous = Some(self.active);
            self.active = mode;
            self.active_changed = true;
            info!("View switched: {:?} -> {:?}", self.previous, self.active);
        }
    }

    /// Check if the view changed this frame
    pub fn just_changed(&self) -> bool {
        self.active_changed
    }

    /// Reset the changed flag (called at end of frame)
    pub fn clear_changed(&mut self) {
        self.active_changed = false;
    }

    pub fn is_active(&self, mode: ViewMode) -> bool {
        self.active == mode
    }

    pub fn previous(&self) -> Option<ViewMode> {
        self.previous
    }
}

/// View identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Live,
    Mask,
    Perspective,
    Grid,
}

impl ViewMode {
    /// Get the view's display name
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Live => "Live",
            ViewMode::Mask => "Mask",
            ViewMode::Perspective => "Perspective",
            ViewMode::Grid => "Grid",
        }
    }

    /// Editor shown in this view, if any
    pub fn editor_variant(&self) -> Option<EditorVariant> {
        match self {
            ViewMode::Live => None,
            ViewMode::Mask => Some(EditorVariant::Mask),
            ViewMode::Perspective => Some(EditorVariant::Perspective),
            ViewMode::Grid => Some(EditorVariant::Grid),
        }
    }
}

impl From<StartMode> for ViewMode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Live => ViewMode::Live,
            StartMode::Mask => ViewMode::Mask,
            StartMode::Perspective => ViewMode::Perspective,
            StartMode::Grid => ViewMode::Grid,
        }
    }
}

/// Event to request a view switch
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchModeEvent {
    pub mode: ViewMode,
}

/// System to handle view switching
pub fn handle_mode_switch(mut mode_state: ResMut<ModeState>, mut events: EventReader<SwitchModeEvent>) {
    for event in events.read() {
        debug!("SwitchModeEvent received: {:?}", event);
        mode_state.activate(event.mode);
    }
}

/// System to clear the changed flag at end of frame
pub fn clear_mode_changed(mut mode_state: ResMut<ModeState>) {
    mode_state.clear_changed();
}

/// Run condition for systems that only matter while an editor is shown
pub fn editor_is_open(state: Res<ModeState>) -> bool {
    state.active != ViewMode::Live
}

/// Plugin to add view mode management
pub struct ModeStatePlugin;

impl Plugin for ModeStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModeState>()
            .add_event::<SwitchModeEvent>()
            .add_systems(PreUpdate, handle_mode_switch)
            .add_systems(PostUpdate, clear_mode_changed);
    }
}

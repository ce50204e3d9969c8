//! Keyboard commands
//!
//! Keys are mapped to `EditorCommand`s first so the bindings and their
//! effects can be exercised without a window.

use crate::core::settings::palette::GRID_COLOR_CYCLE;
use crate::editing::{EditorSurface, Rgb};
use crate::modes::{SwitchModeEvent, ViewMode};
use crate::systems::editor_lifecycle::{ActiveEditor, RestoredPoints, Submitter};
use bevy::prelude::*;

/// Operator command triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    SwitchTo(ViewMode),
    Save,
    Reset,
    Clear,
    ToggleCorners,
    GridResolution(i32),
    GridOpacity(i32),
    CycleGridColor,
    Quit,
}

/// Key binding table
pub fn command_for_key(key: KeyCode) -> Option<EditorCommand> {
    let command = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => EditorCommand::SwitchTo(ViewMode::Mask),
        KeyCode::Digit2 | KeyCode::Numpad2 => EditorCommand::SwitchTo(ViewMode::Perspective),
        KeyCode::Digit3 | KeyCode::Numpad3 => EditorCommand::SwitchTo(ViewMode::Grid),
        KeyCode::Digit0 | KeyCode::Numpad0 | KeyCode::KeyL => EditorCommand::SwitchTo(ViewMode::Live),
        KeyCode::KeyS => EditorCommand::Save,
        KeyCode::KeyR => EditorCommand::Reset,
        KeyCode::KeyC => EditorCommand::Clear,
        KeyCode::KeyG => EditorCommand::ToggleCorners,
        KeyCode::KeyK => EditorCommand::CycleGridColor,
        KeyCode::Equal | KeyCode::NumpadAdd => EditorCommand::GridResolution(1),
        KeyCode::Minus | KeyCode::NumpadSubtract => EditorCommand::GridResolution(-1),
        KeyCode::BracketRight => EditorCommand::GridOpacity(1),
        KeyCode::BracketLeft => EditorCommand::GridOpacity(-1),
        KeyCode::Escape => EditorCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Next color in the cycle after `current`
pub fn next_grid_color(current: Rgb) -> Rgb {
    let next = GRID_COLOR_CYCLE
        .iter()
        .position(|c| *c == current)
        .map_or(0, |i| (i + 1) % GRID_COLOR_CYCLE.len());
    GRID_COLOR_CYCLE[next]
}

/// Apply an editing command to the open surface.
///
/// View switches, saves and quitting need the host and are left to the
/// caller; they return `false` here.
pub fn apply_to_surface(command: EditorCommand, surface: &mut EditorSurface) -> bool {
    match command {
        EditorCommand::Reset => surface.reset(),
        EditorCommand::Clear => {
            surface.clear();
        }
        EditorCommand::ToggleCorners => surface.toggle_grid_corners(),
        EditorCommand::GridResolution(steps) => surface.step_grid_resolution(steps),
        EditorCommand::GridOpacity(steps) => surface.step_grid_opacity(steps),
        EditorCommand::CycleGridColor => {
            if let Some(style) = surface.grid_style() {
                let color = next_grid_color(style.color);
                surface.set_grid_color(color);
            }
        }
        EditorCommand::SwitchTo(_) | EditorCommand::Save | EditorCommand::Quit => return false,
    }
    true
}

/// Dispatch keyboard commands for this frame
pub fn handle_keyboard_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor: ResMut<ActiveEditor>,
    submitter: Res<Submitter>,
    mut restored: ResMut<RestoredPoints>,
    mut switch_events: EventWriter<SwitchModeEvent>,
    mut exit: EventWriter<AppExit>,
) {
    for key in keyboard.get_just_pressed() {
        let Some(command) = command_for_key(*key) else {
            continue;
        };
        debug!("Key {:?} -> {:?}", key, command);

        match command {
            EditorCommand::SwitchTo(mode) => {
                switch_events.write(SwitchModeEvent { mode });
            }
            EditorCommand::Quit => {
                info!("Escape pressed, exiting");
                exit.write(AppExit::Success);
            }
            EditorCommand::Save => {
                let Some(surface) = editor.surface.as_ref() else {
                    debug!("Nothing to save in live view");
                    continue;
                };
                let effect = surface.save(submitter.submitter.as_ref());
                restored.remember(surface.variant(), surface.points().all());
                if effect.return_to_live {
                    switch_events.write(SwitchModeEvent {
                        mode: ViewMode::Live,
                    });
                }
            }
            _ => {
                if let Some(surface) = editor.surface.as_mut() {
                    apply_to_surface(command, surface);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::ZonaSettings;
    use crate::io::{MemoryStore, RecordingSubmitter, SubmitTarget};
    use crate::modes::{ModeState, ModeStatePlugin};
    use crate::systems::editor_lifecycle::{sync_editor_with_mode, GridAttributeStore};
    use kurbo::Point;
    use std::sync::Arc;

    #[test]
    fn bindings_cover_the_operator_keys() {
        assert_eq!(command_for_key(KeyCode::Digit1), Some(EditorCommand::SwitchTo(ViewMode::Mask)));
        assert_eq!(command_for_key(KeyCode::KeyL), Some(EditorCommand::SwitchTo(ViewMode::Live)));
        assert_eq!(command_for_key(KeyCode::Minus), Some(EditorCommand::GridResolution(-1)));
        assert_eq!(command_for_key(KeyCode::BracketRight), Some(EditorCommand::GridOpacity(1)));
        assert_eq!(command_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn color_cycle_wraps_and_recovers_from_custom_colors() {
        assert_eq!(next_grid_color(Rgb::GREEN), Rgb::CYAN);
        assert_eq!(next_grid_color(Rgb::WHITE), Rgb::GREEN);
        assert_eq!(next_grid_color(Rgb::new(1, 2, 3)), Rgb::GREEN);
    }

    #[test]
    fn grid_commands_change_style() {
        let mut grid = EditorSurface::grid(Default::default());
        assert!(apply_to_surface(EditorCommand::GridResolution(-1), &mut grid));
        apply_to_surface(EditorCommand::CycleGridColor, &mut grid);
        apply_to_surface(EditorCommand::ToggleCorners, &mut grid);
        let style = grid.grid_style().unwrap();
        assert_eq!(style.resolution.get(), 19);
        assert_eq!(style.color, Rgb::CYAN);
        assert!(!style.show_corners);
        assert!(!apply_to_surface(EditorCommand::Save, &mut grid));
    }

    #[test]
    fn save_key_submits_and_returns_to_live() {
        let recorder = Arc::new(RecordingSubmitter::default());

        let mut app = App::new();
        app.add_plugins(ModeStatePlugin)
            .insert_resource(ModeState::starting_in(ViewMode::Perspective))
            .insert_resource(ZonaSettings::default())
            .insert_resource(GridAttributeStore {
                store: Box::new(MemoryStore::default()),
            })
            .insert_resource(Submitter {
                submitter: recorder.clone(),
            })
            .init_resource::<RestoredPoints>()
            .init_resource::<ActiveEditor>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<AppExit>()
            .add_systems(Update, (sync_editor_with_mode, handle_keyboard_commands).chain());
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyS);
        app.update();

        let submissions = recorder.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].0, SubmitTarget::Calibration);
        assert_eq!(submissions[0].1[0], Point::new(20.0, 20.0));
        assert!(app.world().resource::<RestoredPoints>().perspective.is_some());

        // the switch lands on the next frame
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        app.update();
        assert_eq!(app.world().resource::<ModeState>().active, ViewMode::Live);
        assert!(app.world().resource::<ActiveEditor>().surface.is_none());
    }
}

//! Pointer input
//!
//! Translates window cursor and mouse button events into normalized
//! `PointerEvent`s for the open editor. Left button is primary, right button
//! is secondary, and the cursor leaving the window ends any gesture.

use crate::editing::{PointerButton, PointerEvent};
use crate::geometry::cursor_to_normalized;
use crate::systems::editor_lifecycle::ActiveEditor;
use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};

/// Raw pointer activity collected over one frame, in window pixels
#[derive(Debug, Default, Clone)]
pub struct PointerFrame {
    pub moves: Vec<Vec2>,
    pub pressed: Vec<MouseButton>,
    pub released: Vec<MouseButton>,
    pub left: bool,
    /// Cursor position after the frame's moves, if the cursor is over the window
    pub cursor: Option<Vec2>,
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Convert one frame of raw activity into editor events.
///
/// Moves come first, then presses, then releases; a leave is always last.
pub fn pointer_events(frame: &PointerFrame, window_size: Vec2) -> Vec<PointerEvent> {
    let mut events: Vec<PointerEvent> = frame
        .moves
        .iter()
        .filter_map(|m| cursor_to_normalized(*m, window_size))
        .map(|position| PointerEvent::Move { position })
        .collect();

    let position = frame.cursor.and_then(|c| cursor_to_normalized(c, window_size));

    if let Some(position) = position {
        events.extend(
            frame
                .pressed
                .iter()
                .filter_map(|b| pointer_button(*b))
                .map(|button| PointerEvent::Down { position, button }),
        );
    }

    if frame.released.contains(&MouseButton::Left) {
        events.push(match position {
            Some(position) => PointerEvent::Up { position },
            None => PointerEvent::Leave,
        });
    }

    if frame.left {
        events.push(PointerEvent::Leave);
    }

    events
}

/// Feed this frame's pointer activity to the open editor
pub fn forward_pointer_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut editor: ResMut<ActiveEditor>,
) {
    let frame = PointerFrame {
        moves: cursor_moved.read().map(|e| e.position).collect(),
        pressed: mouse.get_just_pressed().copied().collect(),
        released: mouse.get_just_released().copied().collect(),
        left: cursor_left.read().count() > 0,
        cursor: None,
    };
    if frame.moves.is_empty() && frame.pressed.is_empty() && frame.released.is_empty() && !frame.left {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let frame = PointerFrame {
        cursor: window.cursor_position(),
        ..frame
    };

    let events = pointer_events(&frame, window.size());
    if events.is_empty() || editor.surface.is_none() {
        return;
    }

    if let Some(surface) = editor.surface.as_mut() {
        for event in events {
            let outcome = surface.handle_pointer(event);
            trace!("{:?} -> {:?}", event, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    const SIZE: Vec2 = Vec2::new(200.0, 100.0);

    #[test]
    fn frame_events_are_ordered_and_normalized() {
        let frame = PointerFrame {
            moves: vec![Vec2::new(20.0, 10.0)],
            pressed: vec![MouseButton::Left, MouseButton::Middle],
            released: vec![MouseButton::Left],
            left: false,
            cursor: Some(Vec2::new(100.0, 50.0)),
        };
        assert_eq!(
            pointer_events(&frame, SIZE),
            vec![
                PointerEvent::move_to(10.0, 10.0),
                PointerEvent::primary_down(50.0, 50.0),
                PointerEvent::up(50.0, 50.0),
            ]
        );
    }

    #[test]
    fn right_button_is_secondary() {
        let frame = PointerFrame {
            pressed: vec![MouseButton::Right],
            released: vec![MouseButton::Right],
            cursor: Some(Vec2::new(0.0, 0.0)),
            ..Default::default()
        };
        assert_eq!(
            pointer_events(&frame, SIZE),
            vec![PointerEvent::secondary_down(0.0, 0.0)]
        );
    }

    #[test]
    fn release_outside_the_window_becomes_leave() {
        let frame = PointerFrame {
            pressed: vec![MouseButton::Left],
            released: vec![MouseButton::Left],
            left: true,
            cursor: None,
            ..Default::default()
        };
        assert_eq!(
            pointer_events(&frame, SIZE),
            vec![PointerEvent::Leave, PointerEvent::Leave]
        );
    }

    #[test]
    fn positions_beyond_the_window_are_passed_through_for_clamping() {
        let frame = PointerFrame {
            moves: vec![Vec2::new(-20.0, 150.0)],
            ..Default::default()
        };
        assert_eq!(
            pointer_events(&frame, SIZE),
            vec![PointerEvent::Move {
                position: Point::new(-10.0, 150.0)
            }]
        );
    }
}

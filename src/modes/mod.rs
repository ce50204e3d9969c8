//! View modes
//!
//! The host shows exactly one view at a time: the live feed without overlays
//! or one of the three editors.

pub mod mode_state;

pub use mode_state::{
    clear_mode_changed, editor_is_open, handle_mode_switch, ModeState, ModeStatePlugin,
    SwitchModeEvent, ViewMode,
};

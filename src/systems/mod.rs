//! Application systems
//!
//! Bevy systems that connect the window to the editor core: view lifecycle,
//! pointer forwarding, keyboard commands and attribute persistence.

pub mod commands;
pub mod editor_lifecycle;
pub mod plugins;
pub mod pointer_input;

pub use commands::{command_for_key, EditorCommand};
pub use editor_lifecycle::{ActiveEditor, GridAttributeStore, RestoredPoints, Submitter};
pub use plugins::{configure_default_plugins, EditorSets, ZonaSystems};

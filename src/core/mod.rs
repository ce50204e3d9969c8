//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Settings and CLI handling
//! - Error types shared by the editing and persistence layers

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use app::create_app;
pub use cli::{CliArgs, StartMode};
pub use errors::{EditError, EditResult, PersistenceError};
pub use runner::run_app;
pub use settings::ZonaSettings;

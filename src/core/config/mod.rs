//! Application configuration management
//!
//! This module handles all configuration aspects:
//! - CLI arguments parsing
//! - User configuration files
//! - Application settings

pub mod user_config;

pub use crate::core::cli::CliArgs;
pub use crate::core::settings::{ZonaSettings, DEFAULT_WINDOW_SIZE, WINDOW_TITLE};
pub use user_config::ConfigFile;

//! Application logging functionality
//!
//! Console output comes from Bevy's `LogPlugin`. This module adds the daily
//! rolling file under ~/.config/zona/logs/, attached through
//! `LogPlugin::custom_layer`.

use crate::core::config::ConfigFile;
use bevy::log::BoxedLayer;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::Layer;

/// Prefix of the rolling log files (`zona.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "zona.log";

/// Whether the file layer should be attached; read while `LogPlugin` builds
#[derive(Resource, Debug, Clone, Copy)]
pub struct FileLogging {
    pub enabled: bool,
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Build the file layer for `LogPlugin::custom_layer`.
///
/// Only writes when the user config directory exists (created by
/// `--new-config`), so a plain run never litters the home directory.
pub fn file_layer(app: &mut App) -> Option<BoxedLayer> {
    let enabled = app
        .world()
        .get_resource::<FileLogging>()
        .is_some_and(|f| f.enabled);
    if !enabled || !ConfigFile::config_dir().exists() {
        return None;
    }

    let dir = logs_dir();
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    Some(
        tracing_subscriber::fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .boxed(),
    )
}

/// Startup system marking the beginning of a session in the log
pub fn log_session_start(file_logging: Option<Res<FileLogging>>) {
    info!(
        "=== Zona started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    if file_logging.is_some_and(|f| f.enabled) && ConfigFile::config_dir().exists() {
        info!("Logging to {:?}", logs_dir());
    }
}

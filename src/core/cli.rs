//! Command line interface for the Zona editor
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Options that can also live in the user config
//! file resolve in the order CLI, config file, built-in default.

use crate::core::config::ConfigFile;
use crate::core::settings::DEFAULT_BACKEND_URL;
use crate::editing::gesture::DEFAULT_HIT_RADIUS;
use bevy::prelude::*;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// View the window opens in
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// No editor, overlays hidden
    #[default]
    Live,
    /// Region-of-interest polygon
    Mask,
    /// Four-point perspective calibration
    Perspective,
    /// Corner-addressed calibration grid
    Grid,
}

impl StartMode {
    /// Parse the name used in the config file
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Zona CLI arguments
///
/// Examples:
///   zona                                  # Open in live view
///   zona --mode mask                      # Start drawing a mask
///   zona --mode perspective -r saved.json # Edit previously saved points
///   zona --backend http://camera:8000     # Submit to another backend
#[derive(Parser, Debug, Resource, Clone, Default)]
#[clap(
    name = "zona",
    version,
    about = "A region and perspective editor for video analytics",
    long_about = "Zona lets an operator draw a region-of-interest mask, a four-point perspective quad or a corner-addressed calibration grid over a video surface and submit the points to a backend."
)]
pub struct CliArgs {
    /// Editor to open on start-up
    #[clap(
        long = "mode",
        short = 'm',
        value_enum,
        help = "Editor to open on start-up",
        long_help = "Editor to open on start-up: live (default), mask, perspective or grid. Falls back to default_mode in settings.json."
    )]
    pub mode: Option<StartMode>,

    /// Backend base URL
    #[clap(
        long = "backend",
        short = 'b',
        help = "Backend base URL",
        long_help = "Base URL that saved points are POSTed to. Masks go to <backend>/roi, perspective and grid points to <backend>/calibration."
    )]
    pub backend: Option<String>,

    /// JSON file with previously saved points
    #[clap(
        long = "restore",
        short = 'r',
        help = "Restore points from a saved JSON file",
        long_help = "Seed the mask or perspective editor from a JSON file holding either {\"points\":[{\"x\":..,\"y\":..}]} or a bare array of points."
    )]
    pub restore: Option<PathBuf>,

    /// Initialize user configuration directory
    ///
    /// This creates the ~/.config/zona directory with:
    /// - settings.json: backend URL, default mode and handle radius
    /// - logs/: daily rolling application logs
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/zona directory with a settings.json file and a logs directory, then exit."
    )]
    pub new_config: bool,

    /// Keep logs on the console only
    #[clap(
        long = "no-log-file",
        help = "Do not write a log file",
        long_help = "Disable the daily rolling log file under ~/.config/zona/logs. Console logging is unaffected."
    )]
    pub no_log_file: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Catches missing restore files and malformed backend URLs before the
    /// window opens.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.restore {
            if !path.is_file() {
                return Err(format!(
                    "Restore file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
        }

        if let Some(url) = &self.backend {
            validate_backend_url(url)?;
        }

        Ok(())
    }

    /// Get the start-up mode from CLI args, config file, or default
    pub fn get_start_mode(&self) -> StartMode {
        self.get_start_mode_with(ConfigFile::load().as_ref())
    }

    fn get_start_mode_with(&self, config: Option<&ConfigFile>) -> StartMode {
        if let Some(mode) = self.mode {
            debug!("Using start mode from CLI: {:?}", mode);
            return mode;
        }

        if let Some(name) = config.and_then(|c| c.default_mode.as_deref()) {
            match StartMode::parse(name) {
                Some(mode) => {
                    debug!("Using start mode from config file: {}", name);
                    return mode;
                }
                None => warn!("Ignoring unknown default_mode '{}' in settings.json", name),
            }
        }

        StartMode::default()
    }

    /// Get the backend URL from CLI args, config file, or default
    pub fn get_backend_url(&self) -> String {
        self.get_backend_url_with(ConfigFile::load().as_ref())
    }

    fn get_backend_url_with(&self, config: Option<&ConfigFile>) -> String {
        if let Some(url) = &self.backend {
            return url.clone();
        }

        if let Some(url) = config.and_then(|c| c.backend_url.as_ref()) {
            if validate_backend_url(url).is_ok() {
                debug!("Using backend from config file: {}", url);
                return url.clone();
            }
            warn!("Ignoring invalid backend_url '{}' in settings.json", url);
        }

        DEFAULT_BACKEND_URL.to_string()
    }

    /// Get the handle hit radius from the config file or default
    pub fn get_handle_radius(&self) -> f64 {
        handle_radius_from(ConfigFile::load().as_ref())
    }

    /// Whether mask vertices can be dragged (config file only, off by default)
    pub fn get_mask_vertex_drag(&self) -> bool {
        ConfigFile::load()
            .and_then(|c| c.mask_vertex_drag)
            .unwrap_or(false)
    }
}

fn handle_radius_from(config: Option<&ConfigFile>) -> f64 {
    match config.and_then(|c| c.handle_radius) {
        Some(radius) if radius.is_finite() && radius > 0.0 => radius,
        Some(radius) => {
            warn!("Ignoring handle_radius {} in settings.json", radius);
            DEFAULT_HIT_RADIUS
        }
        None => DEFAULT_HIT_RADIUS,
    }
}

fn validate_backend_url(url: &str) -> Result<(), String> {
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("Invalid backend URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "Unsupported backend scheme '{other}' in {url}\nUse an http:// or https:// URL."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: Option<&str>, backend: Option<&str>, radius: Option<f64>) -> ConfigFile {
        ConfigFile {
            backend_url: backend.map(str::to_string),
            default_mode: mode.map(str::to_string),
            handle_radius: radius,
            mask_vertex_drag: None,
        }
    }

    #[test]
    fn cli_beats_config_beats_default() {
        let file = config(Some("grid"), Some("http://config:9000"), None);

        let args = CliArgs {
            mode: Some(StartMode::Mask),
            backend: Some("http://cli:1".to_string()),
            ..Default::default()
        };
        assert_eq!(args.get_start_mode_with(Some(&file)), StartMode::Mask);
        assert_eq!(args.get_backend_url_with(Some(&file)), "http://cli:1");

        let bare = CliArgs::default();
        assert_eq!(bare.get_start_mode_with(Some(&file)), StartMode::Grid);
        assert_eq!(bare.get_backend_url_with(Some(&file)), "http://config:9000");

        assert_eq!(bare.get_start_mode_with(None), StartMode::Live);
        assert_eq!(bare.get_backend_url_with(None), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn bad_config_values_fall_back() {
        let file = config(Some("panorama"), Some("ftp://nope"), Some(-1.0));
        let bare = CliArgs::default();
        assert_eq!(bare.get_start_mode_with(Some(&file)), StartMode::Live);
        assert_eq!(bare.get_backend_url_with(Some(&file)), DEFAULT_BACKEND_URL);
        assert_eq!(handle_radius_from(Some(&file)), DEFAULT_HIT_RADIUS);
        assert_eq!(handle_radius_from(Some(&config(None, None, Some(4.0)))), 4.0);
    }

    #[test]
    fn validation_rejects_missing_restore_and_bad_backend() {
        let args = CliArgs {
            restore: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = CliArgs {
            backend: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        let args = CliArgs {
            backend: Some("https://example.com:8443".to_string()),
            ..Default::default()
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn parses_short_flags() {
        let args = CliArgs::parse_from(["zona", "-m", "perspective", "-b", "http://x:1"]);
        assert_eq!(args.mode, Some(StartMode::Perspective));
        assert_eq!(args.backend.as_deref(), Some("http://x:1"));
        assert!(!args.no_log_file);
    }
}

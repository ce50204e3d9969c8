//! Application settings and built-in constants
//!
//! `ZonaSettings` is the runtime configuration resource; the constants below
//! are the built-in defaults it starts from.

use crate::editing::gesture::DEFAULT_HIT_RADIUS;
use bevy::prelude::*;

/// Window title
pub const WINDOW_TITLE: &str = "Zona";

/// Initial window size in logical pixels
pub const DEFAULT_WINDOW_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

/// Backend the editor submits to when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Background behind the overlays (stands in for the live video)
pub const BACKGROUND_COLOR: Color = Color::srgb(0.06, 0.06, 0.08);

/// Runtime settings shared by the editor systems
#[derive(Resource, Debug, Clone)]
pub struct ZonaSettings {
    /// Backend base URL for saves
    pub backend_url: String,
    /// Handle hit radius in normalized units
    pub handle_radius: f64,
    /// Whether placed mask vertices can be dragged
    pub mask_vertex_drag: bool,
}

impl Default for ZonaSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            handle_radius: DEFAULT_HIT_RADIUS,
            mask_vertex_drag: false,
        }
    }
}

/// Variant colors and handle sizes
pub mod palette {
    use crate::editing::style::{Paint, Rgb};

    pub const MASK_STROKE: Paint = Paint {
        color: Rgb::GREEN,
        opacity: 1.0,
    };
    pub const MASK_FILL: Paint = Paint {
        color: Rgb::GREEN,
        opacity: 0.2,
    };
    pub const MASK_FIRST_VERTEX: Paint = Paint {
        color: Rgb::RED,
        opacity: 1.0,
    };
    pub const MASK_HANDLE_RADIUS: f32 = 6.0;

    pub const PERSPECTIVE_STROKE: Paint = Paint {
        color: Rgb::CYAN,
        opacity: 1.0,
    };
    pub const PERSPECTIVE_FILL: Paint = Paint {
        color: Rgb::CYAN,
        opacity: 0.1,
    };
    pub const PERSPECTIVE_HANDLE_RADIUS: f32 = 12.0;

    /// Colors offered when cycling the grid stroke color
    pub const GRID_COLOR_CYCLE: [Rgb; 5] = [
        Rgb::GREEN,
        Rgb::CYAN,
        Rgb::new(0xff, 0xff, 0x00),
        Rgb::RED,
        Rgb::WHITE,
    ];

    pub const GRID_HANDLE_RADIUS: f32 = 9.0;
    pub const GRID_HANDLE_ACTIVE_RADIUS: f32 = 12.0;

    pub const ACTIVE_HANDLE: Paint = Paint {
        color: Rgb::RED,
        opacity: 1.0,
    };
    pub const HANDLE_OUTLINE: Paint = Paint {
        color: Rgb::WHITE,
        opacity: 1.0,
    };
}

//! Colors and grid appearance
//!
//! Style values are plain data; the rendering collaborator decides how to
//! turn them into pixels.

use crate::geometry::{GridResolution, Quad};
use kurbo::Point;
use std::fmt;
use std::str::FromStr;

/// Operator range for grid resolution adjustments
pub const RESOLUTION_RANGE: (u32, u32) = (5, 50);

/// Opacity adjustment step
pub const OPACITY_STEP: f32 = 0.1;

/// An sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const GREEN: Rgb = Rgb::new(0x00, 0xff, 0x00);
    pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
    pub const CYAN: Rgb = Rgb::new(0x00, 0xff, 0xff);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn with_opacity(self, opacity: f32) -> Paint {
        Paint::new(self, opacity)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| format!("not a #rrggbb color: '{s}'"))
    }
}

/// A color with opacity in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub opacity: f32,
}

impl Paint {
    pub fn new(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity: clamp_opacity(opacity),
        }
    }

    pub fn solid(color: Rgb) -> Self {
        Self::new(color, 1.0)
    }
}

/// Line appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    /// Width in logical pixels
    pub width: f32,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(paint: Paint, width: f32) -> Self {
        Self {
            paint,
            width,
            dashed: false,
        }
    }

    pub fn dashed(paint: Paint, width: f32) -> Self {
        Self {
            paint,
            width,
            dashed: true,
        }
    }
}

pub fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}

/// Appearance of the measurement grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub resolution: GridResolution,
    pub color: Rgb,
    pub opacity: f32,
    /// Corner handles visible and draggable
    pub show_corners: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            resolution: GridResolution::default(),
            color: Rgb::GREEN,
            opacity: 0.7,
            show_corners: true,
        }
    }
}

impl GridStyle {
    /// Step the resolution within the operator range
    pub fn step_resolution(&mut self, steps: i32) -> bool {
        let (min, max) = RESOLUTION_RANGE;
        let current = self.resolution.get() as i64;
        let next = (current + steps as i64).clamp(min as i64, max as i64) as u32;
        if next as i64 == current {
            return false;
        }
        self.resolution = GridResolution::new(next);
        true
    }

    /// Step the opacity by whole [`OPACITY_STEP`]s, keeping one decimal
    pub fn step_opacity(&mut self, steps: i32) -> bool {
        let next = clamp_opacity(((self.opacity + steps as f32 * OPACITY_STEP) * 10.0).round() / 10.0);
        if next == self.opacity {
            return false;
        }
        self.opacity = next;
        true
    }

    pub fn line_paint(&self) -> Paint {
        Paint::new(self.color, self.opacity)
    }
}

/// Grid state that survives between sessions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAttributes {
    pub corners: Quad,
    pub style: GridStyle,
}

/// Corners the grid starts from before any customization
pub fn default_grid_corners() -> Quad {
    Quad::new(
        Point::new(15.0, 15.0),
        Point::new(85.0, 15.0),
        Point::new(15.0, 85.0),
        Point::new(85.0, 85.0),
    )
}

impl Default for GridAttributes {
    fn default() -> Self {
        Self {
            corners: default_grid_corners(),
            style: GridStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_print() {
        assert_eq!(Rgb::parse_hex("#00ff00"), Some(Rgb::GREEN));
        assert_eq!(Rgb::parse_hex("FF0000"), Some(Rgb::RED));
        assert_eq!(Rgb::parse_hex("#0f0"), None);
        assert_eq!(Rgb::parse_hex("#gg0000"), None);
        assert_eq!(Rgb::CYAN.to_string(), "#00ffff");
        assert_eq!("#123abc".parse::<Rgb>().unwrap(), Rgb::new(0x12, 0x3a, 0xbc));
    }

    #[test]
    fn resolution_steps_stay_in_operator_range() {
        let mut style = GridStyle::default();
        assert!(style.step_resolution(100));
        assert_eq!(style.resolution.get(), 50);
        assert!(!style.step_resolution(1));
        assert!(style.step_resolution(-100));
        assert_eq!(style.resolution.get(), 5);
    }

    #[test]
    fn opacity_steps_by_tenths() {
        let mut style = GridStyle::default();
        assert!(style.step_opacity(1));
        assert_eq!(style.opacity, 0.8);
        assert!(style.step_opacity(5));
        assert_eq!(style.opacity, 1.0);
        assert!(!style.step_opacity(1));
        assert!(style.step_opacity(-20));
        assert_eq!(style.opacity, 0.0);
    }

    #[test]
    fn paint_clamps_opacity() {
        assert_eq!(Paint::new(Rgb::WHITE, 3.0).opacity, 1.0);
        assert_eq!(Paint::new(Rgb::WHITE, -1.0).opacity, 0.0);
    }
}

//! Durable key-value storage for continuously persisted editor attributes
//!
//! The grid editor writes its corners and style on every change. Values are
//! stored as strings under stable keys so a missing or corrupted entry only
//! loses that one attribute.

use crate::core::errors::PersistenceError;
use crate::editing::style::{clamp_opacity, GridAttributes, Rgb};
use crate::editing::surface::SurfaceChange;
use crate::geometry::point::is_on_surface;
use crate::geometry::grid::{MAX_RESOLUTION, MIN_RESOLUTION};
use crate::geometry::{GridResolution, Quad};
use bevy::log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the four grid corners (JSON object keyed by role)
pub const KEY_GRID_CORNERS: &str = "calibrationCorners";
/// Key of the grid resolution (integer)
pub const KEY_GRID_SIZE: &str = "calibrationGridSize";
/// Key of the grid stroke color (`#rrggbb`)
pub const KEY_GRID_COLOR: &str = "calibrationGridColor";
/// Key of the grid opacity (float in `[0, 1]`)
pub const KEY_GRID_OPACITY: &str = "calibrationGridOpacity";

/// String storage keyed by attribute name
pub trait AttributeStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError>;
}

/// In-memory store, for tests and sessions that should not persist
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl AttributeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON object on disk.
///
/// The whole file is rewritten on every `set`; the attribute set is tiny.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => {
                    debug!("Loaded attributes from {:?}", path);
                    values
                }
                Err(e) => {
                    warn!("Failed to parse {:?}, starting empty: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read {:?}, starting empty: {}", path, e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents).map_err(io_err)?;
        Ok(())
    }
}

impl AttributeStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        if self.values.get(key) == Some(&value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value);
        self.write()
    }
}

impl GridAttributes {
    /// Seed grid attributes from the store.
    ///
    /// Each attribute falls back to its default on its own when absent or
    /// unparsable.
    pub fn load(store: &dyn AttributeStore) -> Self {
        let defaults = GridAttributes::default();
        let mut attributes = defaults;

        if let Some(raw) = store.get(KEY_GRID_CORNERS) {
            match serde_json::from_str::<Quad>(&raw) {
                Ok(quad) if quad.to_role_array().iter().all(|p| is_on_surface(*p)) => {
                    attributes.corners = quad;
                }
                Ok(_) => warn!("Stored grid corners are off the surface, using defaults"),
                Err(e) => warn!("Ignoring unparsable grid corners: {}", e),
            }
        }
        if let Some(raw) = store.get(KEY_GRID_SIZE) {
            match raw.trim().parse::<u32>() {
                Ok(cells) => {
                    let resolution = GridResolution::new(cells);
                    if resolution.get() != cells {
                        warn!(
                            "Stored grid size {} is outside {}..={}, using {}",
                            cells,
                            MIN_RESOLUTION,
                            MAX_RESOLUTION,
                            resolution.get()
                        );
                    }
                    attributes.style.resolution = resolution;
                }
                Err(e) => warn!("Ignoring unparsable grid size '{}': {}", raw, e),
            }
        }
        if let Some(raw) = store.get(KEY_GRID_COLOR) {
            match Rgb::parse_hex(&raw) {
                Some(color) => attributes.style.color = color,
                None => warn!("Ignoring unparsable grid color '{}'", raw),
            }
        }
        if let Some(raw) = store.get(KEY_GRID_OPACITY) {
            match raw.trim().parse::<f32>() {
                Ok(opacity) if opacity.is_finite() => attributes.style.opacity = clamp_opacity(opacity),
                Ok(_) => warn!("Ignoring non-finite grid opacity"),
                Err(e) => warn!("Ignoring unparsable grid opacity '{}': {}", raw, e),
            }
        }

        attributes
    }

    /// Write the single attribute a change touched
    pub fn persist(store: &mut dyn AttributeStore, change: &SurfaceChange) -> Result<(), PersistenceError> {
        match change {
            SurfaceChange::Corners(quad) => store.set(KEY_GRID_CORNERS, serde_json::to_string(quad)?),
            SurfaceChange::Resolution(resolution) => store.set(KEY_GRID_SIZE, resolution.get().to_string()),
            SurfaceChange::Color(color) => store.set(KEY_GRID_COLOR, color.to_string()),
            SurfaceChange::Opacity(opacity) => store.set(KEY_GRID_OPACITY, opacity.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemoryStore::default();
        assert_eq!(GridAttributes::load(&store), GridAttributes::default());
    }

    #[test]
    fn attributes_fall_back_independently() {
        let mut store = MemoryStore::default();
        store.set(KEY_GRID_CORNERS, "{not json".to_string()).unwrap();
        store.set(KEY_GRID_SIZE, "12".to_string()).unwrap();
        store.set(KEY_GRID_COLOR, "purple".to_string()).unwrap();
        store.set(KEY_GRID_OPACITY, "0.4".to_string()).unwrap();

        let attributes = GridAttributes::load(&store);
        assert_eq!(attributes.corners, GridAttributes::default().corners);
        assert_eq!(attributes.style.resolution.get(), 12);
        assert_eq!(attributes.style.color, Rgb::GREEN);
        assert_eq!(attributes.style.opacity, 0.4);
    }

    #[test]
    fn out_of_range_grid_size_loads_clamped() {
        let mut store = MemoryStore::default();
        store.set(KEY_GRID_SIZE, "500".to_string()).unwrap();
        assert_eq!(GridAttributes::load(&store).style.resolution.get(), MAX_RESOLUTION);

        store.set(KEY_GRID_SIZE, "0".to_string()).unwrap();
        assert_eq!(GridAttributes::load(&store).style.resolution.get(), MIN_RESOLUTION);
    }

    #[test]
    fn persisted_changes_load_back() {
        let mut store = MemoryStore::default();
        let quad = Quad::new(
            Point::new(5.0, 10.0),
            Point::new(95.0, 12.0),
            Point::new(0.0, 90.0),
            Point::new(100.0, 88.0),
        );
        GridAttributes::persist(&mut store, &SurfaceChange::Corners(quad)).unwrap();
        GridAttributes::persist(&mut store, &SurfaceChange::Color(Rgb::CYAN)).unwrap();
        GridAttributes::persist(&mut store, &SurfaceChange::Resolution(GridResolution::new(8))).unwrap();

        let attributes = GridAttributes::load(&store);
        assert_eq!(attributes.corners, quad);
        assert_eq!(attributes.style.color, Rgb::CYAN);
        assert_eq!(attributes.style.resolution.get(), 8);
        assert_eq!(store.get(KEY_GRID_COLOR).as_deref(), Some("#00ffff"));
    }

    #[test]
    fn corners_use_role_keyed_json() {
        let mut store = MemoryStore::default();
        store
            .set(
                KEY_GRID_CORNERS,
                r#"{"topLeft":{"x":10,"y":10},"topRight":{"x":90,"y":10},
                    "bottomLeft":{"x":10,"y":90},"bottomRight":{"x":90,"y":90}}"#
                    .to_string(),
            )
            .unwrap();
        let attributes = GridAttributes::load(&store);
        assert_eq!(attributes.corners.top_right, Point::new(90.0, 10.0));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("attributes.json");

        let mut store = JsonFileStore::open(&path);
        store.set(KEY_GRID_SIZE, "33".to_string()).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(KEY_GRID_SIZE).as_deref(), Some("33"));
        assert_eq!(GridAttributes::load(&reopened).style.resolution.get(), 33);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attributes.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(KEY_GRID_SIZE), None);
    }
}

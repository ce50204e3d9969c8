//! Loading previously saved point sequences
//!
//! Accepts the same `{"points": [...]}` document the backend receives, or a
//! bare array of `{x, y}` objects.

use crate::io::submission::SavedPoints;
use anyhow::{Context, Result};
use bevy::log::debug;
use kurbo::Point;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum SavedDocument {
    Wrapped(SavedPoints),
    Bare(Vec<Point>),
}

/// Parse a saved point document
pub fn parse_saved_points(contents: &str) -> Result<Vec<Point>> {
    let document: SavedDocument =
        serde_json::from_str(contents).context("Saved points are not a valid point document")?;
    let points = match document {
        SavedDocument::Wrapped(saved) => saved.points,
        SavedDocument::Bare(points) => points,
    };
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        anyhow::bail!("Saved point ({}, {}) is not finite", bad.x, bad.y);
    }
    Ok(points)
}

/// Read a saved point document from disk
pub fn load_saved_points(path: &Path) -> Result<Vec<Point>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let points = parse_saved_points(&contents).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("Loaded {} saved points from {:?}", points.len(), path);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn wrapped_and_bare_documents_parse() {
        let wrapped = parse_saved_points(r#"{"points":[{"x":1,"y":2},{"x":3.5,"y":4}]}"#).unwrap();
        let bare = parse_saved_points(r#"[{"x":1,"y":2},{"x":3.5,"y":4}]"#).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[1], Point::new(3.5, 4.0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_saved_points("{\"points\": 7}").is_err());
        assert!(parse_saved_points("not json").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"points":[{{"x":20,"y":20}}]}}"#).unwrap();
        let points = load_saved_points(file.path()).unwrap();
        assert_eq!(points, vec![Point::new(20.0, 20.0)]);
    }
}

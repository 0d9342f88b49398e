//! Viewer settings persisted between runs
//!
//! A small RON file in the platform config directory. A missing or
//! unreadable file falls back to defaults; saving reports errors to the
//! caller so they can surface on the status line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rasterizer::Color;

/// Rotation speed slider bounds, radians per frame
pub const SPEED_MIN: f32 = 0.01;
pub const SPEED_MAX: f32 = 0.10;
pub const SPEED_STEP: f32 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub rotation_speed: f32,
    pub highlight_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.02,
            highlight_color: Color::RED,
        }
    }
}

impl ViewerConfig {
    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load() -> Self {
        config_path()
            .and_then(|path| read_config(&path))
            .unwrap_or_default()
    }

    /// Write settings to the platform config directory. Targets without
    /// one (wasm) skip the write.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = config_path() else {
            return Ok(());
        };
        write_config(self, &path)
    }

    /// Clamp loaded values into the range the panel slider can produce
    fn sanitized(mut self) -> Self {
        self.rotation_speed = self.rotation_speed.clamp(SPEED_MIN, SPEED_MAX);
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> Option<PathBuf> {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    Some(base.join("meshview").join("settings.ron"))
}

#[cfg(target_arch = "wasm32")]
fn config_path() -> Option<PathBuf> {
    None
}

fn read_config(path: &Path) -> Option<ViewerConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match ron::from_str::<ViewerConfig>(&contents) {
        Ok(config) => Some(config.sanitized()),
        Err(e) => {
            eprintln!("Ignoring unreadable config {}: {}", path.display(), e);
            None
        }
    }
}

fn write_config(config: &ViewerConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(config, pretty).map_err(|e| e.to_string())?;
    std::fs::write(path, contents).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        let config = ViewerConfig {
            rotation_speed: 0.07,
            highlight_color: Color::new(30, 136, 229),
        };
        write_config(&config, &path).unwrap();

        let loaded = read_config(&path).unwrap();
        assert!((loaded.rotation_speed - 0.07).abs() < 1e-6);
        assert_eq!(loaded.highlight_color, Color::new(30, 136, 229));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_config(&dir.path().join("nope.ron")).is_none());
        let config = ViewerConfig::default();
        assert_eq!(config.highlight_color, Color::RED);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        std::fs::write(&path, "(rotation_speed: what").unwrap();
        assert!(read_config(&path).is_none());
    }

    #[test]
    fn test_out_of_range_speed_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        let config = ViewerConfig {
            rotation_speed: 9.0,
            highlight_color: Color::RED,
        };
        write_config(&config, &path).unwrap();

        let loaded = read_config(&path).unwrap();
        assert!((loaded.rotation_speed - SPEED_MAX).abs() < 1e-6);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");
        write_config(&ViewerConfig::default(), &path).unwrap();
        assert!(path.exists());
    }
}

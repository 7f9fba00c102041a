//! Viewer configuration structures
//!
//! Every section falls back to its defaults when missing, so a partial RON
//! file only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_OBJECT_COLOR;
use crate::object::ObjectDefaults;

/// Main camera defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial camera position (looking at the origin)
    pub position: [f32; 3],
    /// Initial up vector
    pub up: [f32; 3],
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Pan sensitivity multiplier
    pub pan_sensitivity: f32,
    /// Zoom sensitivity multiplier
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 1.0,
            far_plane: 2000.0,
            position: [0.0, 0.0, 15.0],
            up: [0.0, 1.0, 0.0],
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 0.1,
        }
    }
}

/// Drag controller settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    /// Rays whose direction is closer than this to the drag plane count as parallel
    pub parallel_epsilon: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            parallel_epsilon: 1e-6,
        }
    }
}

/// How the gizmo cube labels its faces
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FaceLabels {
    /// Colored faces only
    Hidden,
    /// Face names drawn at each visible face center
    #[default]
    Text,
}

/// Orientation gizmo settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// Side length of the square gizmo surface in pixels
    pub size: f32,
    /// Gizmo camera position; its length is the fixed follow distance
    pub camera_position: [f32; 3],
    /// Gizmo camera field of view in degrees
    pub fov_degrees: f32,
    /// Snap animation duration in milliseconds
    pub snap_duration_ms: u64,
    /// Edge length of the gizmo cube
    pub cube_size: f32,
    /// Radius of the ring the drag handle travels on
    pub ring_radius: f32,
    /// Radius of the drag handle sphere
    pub handle_radius: f32,
    /// Ring-drag sensitivity (radians per horizontal pixel)
    pub ring_sensitivity: f32,
    /// Rotation applied by an arrow control, in degrees
    pub arrow_step_degrees: f32,
    /// Radius of an arrow control's hit circle in pixels
    pub arrow_hit_radius: f32,
    /// Draw the axis helper
    pub show_axes: bool,
    /// Draw and accept arrow controls
    pub show_arrows: bool,
    /// Face label rendering
    pub labels: FaceLabels,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            size: 150.0,
            camera_position: [3.0, 3.0, 3.0],
            fov_degrees: 50.0,
            snap_duration_ms: 100,
            cube_size: 1.0,
            ring_radius: 1.2,
            handle_radius: 0.15,
            ring_sensitivity: 0.01,
            arrow_step_degrees: 45.0,
            arrow_hit_radius: 10.0,
            show_axes: true,
            show_arrows: true,
            labels: FaceLabels::default(),
        }
    }
}

/// Keyboard movement settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Distance moved per tick while a movement key is held
    pub move_speed: f32,
    /// Angle (radians) rotated per tick while a rotation key is held
    pub rotation_speed: f32,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            rotation_speed: 0.05,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Main camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Drag settings
    #[serde(default)]
    pub drag: DragConfig,
    /// Gizmo settings
    #[serde(default)]
    pub gizmo: GizmoConfig,
    /// Keyboard settings
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    /// Object creation dimensions
    #[serde(default)]
    pub objects: ObjectDefaults,
    /// Initial color offered by the property panel (RGBA)
    #[serde(default = "default_object_color")]
    pub default_color: [f32; 4],
}

fn default_object_color() -> [f32; 4] {
    DEFAULT_OBJECT_COLOR
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            drag: DragConfig::default(),
            gizmo: GizmoConfig::default(),
            keyboard: KeyboardConfig::default(),
            objects: ObjectDefaults::default(),
            default_color: DEFAULT_OBJECT_COLOR,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl ViewerConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to pretty RON text
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&text)
    }

    /// Save to a configuration file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = self.to_ron()?;
        std::fs::write(path.as_ref(), text).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Load a configuration file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ViewerConfig::from_ron("(gizmo: (snap_duration_ms: 250))").unwrap();
        assert_eq!(config.gizmo.snap_duration_ms, 250);
        assert_eq!(config.gizmo.size, 150.0);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.default_color, DEFAULT_OBJECT_COLOR);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.ron");

        let mut config = ViewerConfig::default();
        config.keyboard.move_speed = 0.5;
        config.gizmo.labels = FaceLabels::Hidden;
        config.save(&path).unwrap();

        let loaded = ViewerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(camera: [").unwrap();

        assert!(matches!(
            ViewerConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(ViewerConfig::load_or_default(&path), ViewerConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");
        assert!(matches!(ViewerConfig::load(&path), Err(ConfigError::Io(_))));
        assert_eq!(ViewerConfig::load_or_default(&path), ViewerConfig::default());
    }
}

//! Application configuration: JSON file, defaults, or interactive prompts.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hand_landmarks::{is_valid_threshold, PINCH_THRESHOLD};
use serde::Deserialize;
use tracing::warn;
use voxel_lattice::{CameraPose, BUILD_DISTANCE, CELL_SIZE};

// ════════════════════════════════════════════════════════════════════════════
// CameraConfig
// ════════════════════════════════════════════════════════════════════════════

/// Lens parameters.  Position and orientation are fixed; aspect comes from
/// the window.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near:          f32,
    pub far:           f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let pose = CameraPose::default();
        CameraConfig { fov_y_degrees: pose.fov_y_degrees, near: pose.near, far: pose.far }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pinch_threshold: f32,
    pub cell_size:       f32,
    pub build_distance:  f32,
    pub camera:          CameraConfig,
    pub window_width:    usize,
    pub window_height:   usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            pinch_threshold: PINCH_THRESHOLD,
            cell_size:       CELL_SIZE,
            build_distance:  BUILD_DISTANCE,
            camera:          CameraConfig::default(),
            window_width:    960,
            window_height:   540,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: AppConfig = serde_json::from_str(text)?;
        Ok(cfg.sanitized())
    }

    /// Replace out-of-range values with defaults (or clamp them).
    pub fn sanitized(mut self) -> Self {
        let d = AppConfig::default();

        if !is_valid_threshold(self.pinch_threshold) {
            warn!(value = self.pinch_threshold, "pinch_threshold out of (0, 1); using default");
            self.pinch_threshold = d.pinch_threshold;
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            warn!(value = self.cell_size, "cell_size must be positive; using default");
            self.cell_size = d.cell_size;
        }
        if !(self.build_distance.is_finite() && self.build_distance > 0.0) {
            warn!(value = self.build_distance, "build_distance must be positive; using default");
            self.build_distance = d.build_distance;
        }
        self.camera.fov_y_degrees = self.camera.fov_y_degrees.clamp(10.0, 150.0);
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            warn!("camera near/far invalid; using defaults");
            self.camera.near = d.camera.near;
            self.camera.far  = d.camera.far;
        }
        self.window_width  = self.window_width.clamp(320, 3840);
        self.window_height = self.window_height.clamp(240, 2160);
        self
    }

    /// The session camera: at the origin, looking down −Z.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose {
            fov_y_degrees: self.camera.fov_y_degrees,
            aspect:        self.window_width as f32 / self.window_height as f32,
            near:          self.camera.near,
            far:           self.camera.far,
            ..CameraPose::default()
        }
    }

    /// Prompt on stdin for the tunables; empty input keeps the default.
    pub fn interactive() -> Self {
        let d = AppConfig::default();
        let pinch_threshold = read_f32(
            &format!("  Pinch threshold (default {}): ", d.pinch_threshold),
            d.pinch_threshold,
        );
        let cell_size = read_f32(
            &format!("  Cell size (default {}): ", d.cell_size),
            d.cell_size,
        );
        let build_distance = read_f32(
            &format!("  Build distance (default {}): ", d.build_distance),
            d.build_distance,
        );
        AppConfig { pinch_threshold, cell_size, build_distance, ..d }.sanitized()
    }
}

fn read_f32(prompt: &str, default: f32) -> f32 {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().parse().unwrap_or(default)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = AppConfig::from_json(r#"{"cell_size": 0.5, "camera": {"fov_y_degrees": 60}}"#).unwrap();
        assert_eq!(cfg.cell_size, 0.5);
        assert_eq!(cfg.camera.fov_y_degrees, 60.0);
        assert_eq!(cfg.build_distance, BUILD_DISTANCE);
        assert_eq!(cfg.camera.near, CameraConfig::default().near);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = AppConfig::from_json(r#"{"cell_size": -1, "pinch_threshold": 3, "window_width": 10}"#).unwrap();
        assert_eq!(cfg.cell_size, CELL_SIZE);
        assert_eq!(cfg.pinch_threshold, PINCH_THRESHOLD);
        assert_eq!(cfg.window_width, 320);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{cell_size:").is_err());
    }

    #[test]
    fn camera_pose_uses_window_aspect() {
        let cfg = AppConfig { window_width: 800, window_height: 400, ..AppConfig::default() };
        let pose = cfg.camera_pose();
        assert_eq!(pose.aspect, 2.0);
        assert!(pose.is_valid());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/pinch.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/pinch.json"));
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Renderer configuration
//!
//! Loaded from a TOML file. Every field has a default, so a partial file (or
//! no file at all) is valid:
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//!
//! [render]
//! backend = "gpu"
//! show_grid = false
//!
//! [light]
//! ambient = 0.25
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::error::{RenderError, Result};
use crate::core::raster::{Light, StarField};
use crate::core::scene::BackendKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Frame buffer width in pixels
    pub width: u32,
    /// Frame buffer height in pixels
    pub height: u32,
    /// Frame pacing target
    pub target_fps: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            target_fps: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub backend: BackendKind,
    pub show_grid: bool,
    pub show_skybox: bool,
    pub show_stars: bool,
    /// Face size of the built-in sky
    pub skybox_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Cpu,
            show_grid: true,
            show_skybox: true,
            show_stars: true,
            skybox_size: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second
    pub move_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            fov_y: camera.fov_y,
            near: camera.near,
            far: camera.far,
            move_speed: 4.0,
            turn_speed: 90.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// OBJ file loaded at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
    /// Texture for meshes without one of their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_texture: Option<PathBuf>,
    /// Sky faces in +X, -X, +Y, -Y, +Z, -Z order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skybox: Option<[PathBuf; 6]>,
}

/// Complete renderer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub window: WindowConfig,
    pub render: RenderSettings,
    pub camera: CameraConfig,
    pub light: Light,
    pub stars: StarField,
    pub assets: AssetConfig,
}

impl RenderConfig {
    /// Read a config file
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`RenderError::Io`] if the file exists but cannot be read, and
    /// [`RenderError::Config`] if it does not parse or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            RenderError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RenderError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(RenderError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(RenderError::Config(format!(
                "need 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        if !(self.camera.fov_y > 0.0 && self.camera.fov_y < 180.0) {
            return Err(RenderError::Config(format!(
                "fov_y must be in (0, 180), got {}",
                self.camera.fov_y
            )));
        }
        Ok(())
    }

    /// Starting camera with the configured lens
    pub fn camera(&self) -> Camera {
        Camera {
            fov_y: self.camera.fov_y,
            near: self.camera.near,
            far: self.camera.far,
            ..Camera::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RenderConfig::load(dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("render.toml");

        let mut config = RenderConfig::default();
        config.window.width = 320;
        config.render.backend = BackendKind::Gpu;
        config.light.ambient = 0.3;
        config.assets.model = Some(PathBuf::from("models/teapot.obj"));
        config.save(&path).expect("save");

        assert_eq!(RenderConfig::load(&path).expect("load"), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[render]\nbackend = \"gpu\"\nshow_grid = false\n").expect("write");

        let config = RenderConfig::load(&path).expect("load");
        assert_eq!(config.render.backend, BackendKind::Gpu);
        assert!(!config.render.show_grid);
        assert!(config.render.show_skybox);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_invalid_files_are_config_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");

        fs::write(&path, "[render]\nbackend = \"vulkan\"\n").expect("write");
        assert!(matches!(RenderConfig::load(&path), Err(RenderError::Config(_))));

        fs::write(&path, "[camera]\nnear = 5.0\nfar = 1.0\n").expect("write");
        assert!(matches!(RenderConfig::load(&path), Err(RenderError::Config(_))));
    }
}

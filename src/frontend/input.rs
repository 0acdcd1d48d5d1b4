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

//! Keyboard input for the fly camera
//!
//! Keys map to [`CameraAction`]s. The handler tracks which actions are held
//! and turns them into camera motion once per frame, scaled by the frame
//! time, so movement speed does not depend on the frame rate.
//!
//! Bindings are read from a TOML file:
//!
//! ```toml
//! [key_mapping]
//! KeyW = "forward"
//! ArrowLeft = "yaw_left"
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::core::camera::Camera;
use crate::core::config::CameraConfig;
use crate::core::error::{RenderError, Result};

/// Default bindings file, next to the working directory
pub const DEFAULT_INPUT_CONFIG: &str = "input.toml";

/// Something a held key does to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl CameraAction {
    pub const ALL: [CameraAction; 10] = [
        CameraAction::Forward,
        CameraAction::Back,
        CameraAction::Left,
        CameraAction::Right,
        CameraAction::Up,
        CameraAction::Down,
        CameraAction::YawLeft,
        CameraAction::YawRight,
        CameraAction::PitchUp,
        CameraAction::PitchDown,
    ];
}

impl fmt::Display for CameraAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraAction::Forward => "Forward",
            CameraAction::Back => "Back",
            CameraAction::Left => "Strafe Left",
            CameraAction::Right => "Strafe Right",
            CameraAction::Up => "Rise",
            CameraAction::Down => "Sink",
            CameraAction::YawLeft => "Turn Left",
            CameraAction::YawRight => "Turn Right",
            CameraAction::PitchUp => "Look Up",
            CameraAction::PitchDown => "Look Down",
        };
        f.write_str(name)
    }
}

/// Bindings as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Key name to action
    pub key_mapping: HashMap<String, CameraAction>,
}

impl InputConfig {
    pub fn default_config() -> Self {
        let bindings = [
            (KeyCode::KeyW, CameraAction::Forward),
            (KeyCode::KeyS, CameraAction::Back),
            (KeyCode::KeyA, CameraAction::Left),
            (KeyCode::KeyD, CameraAction::Right),
            (KeyCode::KeyE, CameraAction::Up),
            (KeyCode::Space, CameraAction::Up),
            (KeyCode::KeyQ, CameraAction::Down),
            (KeyCode::ShiftLeft, CameraAction::Down),
            (KeyCode::ArrowLeft, CameraAction::YawLeft),
            (KeyCode::ArrowRight, CameraAction::YawRight),
            (KeyCode::ArrowUp, CameraAction::PitchUp),
            (KeyCode::ArrowDown, CameraAction::PitchDown),
        ];
        let key_mapping = bindings
            .into_iter()
            .map(|(key, action)| (keycode_to_string(key), action))
            .collect();
        Self { key_mapping }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            RenderError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RenderError::Config(format!("Failed to serialize bindings: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

pub(crate) fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Inverse of [`keycode_to_string`] for the keys worth binding
pub(crate) fn string_to_keycode(s: &str) -> Option<KeyCode> {
    let key = match s {
        "KeyA" => KeyCode::KeyA,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Numpad2" => KeyCode::Numpad2,
        "Numpad4" => KeyCode::Numpad4,
        "Numpad6" => KeyCode::Numpad6,
        "Numpad8" => KeyCode::Numpad8,
        _ => return None,
    };
    Some(key)
}

/// Maps keys to camera actions and remembers which are held
#[derive(Debug)]
pub struct InputHandler {
    pub(crate) key_mapping: HashMap<KeyCode, CameraAction>,
    pub(crate) held: HashSet<CameraAction>,
    pub(crate) config_path: PathBuf,
}

impl InputHandler {
    /// Handler using [`DEFAULT_INPUT_CONFIG`]
    pub fn new() -> Self {
        Self::with_config_path(DEFAULT_INPUT_CONFIG)
    }

    /// Handler with bindings from `config_path`
    ///
    /// Falls back to the default bindings if the file is missing or invalid.
    pub fn with_config_path<P: AsRef<Path>>(config_path: P) -> Self {
        let config_path = config_path.as_ref().to_path_buf();
        let config = InputConfig::load(&config_path).unwrap_or_else(|e| {
            log::info!("Using default key bindings ({})", e);
            InputConfig::default_config()
        });
        Self::from_config(config, config_path)
    }

    pub fn from_config(config: InputConfig, config_path: PathBuf) -> Self {
        let mut key_mapping = HashMap::new();
        for (key_str, action) in config.key_mapping {
            match string_to_keycode(&key_str) {
                Some(key) => {
                    key_mapping.insert(key, action);
                }
                None => log::warn!("Unknown key code in bindings: {}", key_str),
            }
        }
        Self {
            key_mapping,
            held: HashSet::new(),
            config_path,
        }
    }

    /// Record a key event
    ///
    /// Returns the bound action and its new state, or `None` for an
    /// unbound key.
    pub fn handle_keyboard(&mut self, key: KeyCode, pressed: bool) -> Option<(CameraAction, bool)> {
        let action = *self.key_mapping.get(&key)?;
        if pressed {
            self.held.insert(action);
        } else {
            self.held.remove(&action);
        }
        Some((action, pressed))
    }

    pub fn is_held(&self, action: CameraAction) -> bool {
        self.held.contains(&action)
    }

    /// Forget every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    fn axis(&self, positive: CameraAction, negative: CameraAction) -> f32 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Held movement as `(forward, right, up)`, each in `[-1, 1]`
    pub fn movement(&self) -> (f32, f32, f32) {
        (
            self.axis(CameraAction::Forward, CameraAction::Back),
            self.axis(CameraAction::Right, CameraAction::Left),
            self.axis(CameraAction::Up, CameraAction::Down),
        )
    }

    /// Held rotation as `(yaw, pitch)`, each in `[-1, 1]`
    ///
    /// Positive yaw turns left and positive pitch looks up.
    pub fn rotation(&self) -> (f32, f32) {
        (
            self.axis(CameraAction::YawLeft, CameraAction::YawRight),
            self.axis(CameraAction::PitchUp, CameraAction::PitchDown),
        )
    }

    /// Move and turn the camera for a frame lasting `dt` seconds
    ///
    /// Returns whether the camera changed.
    pub fn apply(&self, camera: &mut Camera, dt: f32, speeds: &CameraConfig) -> bool {
        let (forward, right, up) = self.movement();
        let (yaw, pitch) = self.rotation();
        if forward == 0.0 && right == 0.0 && up == 0.0 && yaw == 0.0 && pitch == 0.0 {
            return false;
        }
        let step = speeds.move_speed * dt;
        let turn = speeds.turn_speed * dt;
        camera.fly(forward * step, right * step, up * step);
        camera.turn(yaw * turn, pitch * turn);
        true
    }

    pub fn set_key_mapping(&mut self, key: KeyCode, action: CameraAction) {
        self.key_mapping.insert(key, action);
    }

    pub fn remove_key_mapping(&mut self, key: KeyCode) {
        if let Some(action) = self.key_mapping.remove(&key) {
            self.held.remove(&action);
        }
    }

    pub fn key_mapping(&self) -> &HashMap<KeyCode, CameraAction> {
        &self.key_mapping
    }

    /// Actions bound to more than one key
    pub fn detect_conflicts(&self) -> Vec<(CameraAction, Vec<KeyCode>)> {
        self.keys_by_action()
            .into_iter()
            .filter(|(_, keys)| keys.len() > 1)
            .collect()
    }

    pub fn save_config(&self) -> Result<()> {
        let key_mapping = self
            .key_mapping
            .iter()
            .map(|(&key, &action)| (keycode_to_string(key), action))
            .collect();
        InputConfig { key_mapping }.save(&self.config_path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Every bound action with its keys, in [`CameraAction::ALL`] order
    pub fn get_action_mappings(&self) -> Vec<(CameraAction, Vec<KeyCode>)> {
        self.keys_by_action()
    }

    fn keys_by_action(&self) -> Vec<(CameraAction, Vec<KeyCode>)> {
        let mut by_action: HashMap<CameraAction, Vec<KeyCode>> = HashMap::new();
        for (&key, &action) in &self.key_mapping {
            by_action.entry(action).or_default().push(key);
        }
        let mut result: Vec<_> = by_action
            .into_iter()
            .map(|(action, mut keys)| {
                keys.sort_by_key(|k| keycode_to_string(*k));
                (action, keys)
            })
            .collect();
        result.sort_by_key(|(action, _)| *action);
        result
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

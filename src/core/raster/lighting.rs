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

//! Directional light plus ambient
//!
//! Lighting is flat: one factor per triangle from its world-space face normal.
//! The factor is computed on the host for both backends and then applied per
//! pixel with [`color::modulate`](super::color::modulate).

use serde::{Deserialize, Serialize};

use crate::core::math::Vec3;

/// Single directional light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    /// Direction towards the light (normalised on use)
    pub direction: Vec3,
    /// Minimum brightness of faces turned away from the light
    pub ambient: f32,
    /// Per-channel tint of the light
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.6, 0.8, -0.3),
            ambient: 0.15,
            color: Vec3::new(1.0, 0.95, 0.8),
        }
    }
}

impl Light {
    /// Brightness of a face with normal `normal`
    ///
    /// `ambient + (1 - ambient) * max(0, n·l)`, capped at 1.
    pub fn factor(&self, normal: Vec3) -> f32 {
        let diffuse = normal.dot(self.direction.normalize()).max(0.0);
        (self.ambient + (1.0 - self.ambient) * diffuse).min(1.0)
    }

    /// Brightness of the triangle `(w0, w1, w2)` given in world space
    pub fn triangle_factor(&self, w0: Vec3, w1: Vec3, w2: Vec3) -> f32 {
        self.factor(face_normal(w0, w1, w2))
    }
}

/// Unit normal of a triangle, `normalize((w1 - w0) × (w2 - w0))`
pub fn face_normal(w0: Vec3, w1: Vec3, w2: Vec3) -> Vec3 {
    (w1 - w0).cross(w2 - w0).normalize()
}

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

//! Fly camera
//!
//! The camera is placed like any other object, by a rotation followed by a
//! translation. Its view matrix is the rigid inverse of that placement:
//!
//! ```text
//! world = Rx(pitch) * Ry(yaw) * T(position)
//! view  = world⁻¹
//! ```
//!
//! With no rotation the camera looks down +Z with +Y up.

use crate::core::math::{Mat4, Vec3};
use crate::core::raster::{FrameContext, Light};

/// Pitch stops short of straight up or down
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Degrees around Y
    pub yaw: f32,
    /// Degrees around X, positive looks up, clamped to [`PITCH_LIMIT`]
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, -6.0),
            yaw: 0.0,
            pitch: -15.0,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Camera placement in world space
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.pitch) * Mat4::rotation_y(self.yaw) * Mat4::translation(self.position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().rigid_inverse()
    }

    /// Perspective projection for a `width` x `height` viewport
    pub fn projection_matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = height.max(1) as f32 / width.max(1) as f32;
        Mat4::perspective(self.fov_y, aspect, self.near, self.far)
    }

    /// World-space viewing direction
    pub fn forward(&self) -> Vec3 {
        self.world_matrix().transform_vector(Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.world_matrix().transform_vector(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.world_matrix().transform_vector(Vec3::Y)
    }

    /// Move along the camera's own axes
    pub fn fly(&mut self, forward: f32, right: f32, up: f32) {
        self.position = self.position + self.forward() * forward + self.right() * right + Vec3::Y * up;
    }

    /// Turn by `yaw` and `pitch` degrees
    pub fn turn(&mut self, yaw: f32, pitch: f32) {
        self.yaw = (self.yaw + yaw) % 360.0;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Per-frame state for a `width` x `height` target
    pub fn frame_context(&self, width: u32, height: u32, light: Light) -> FrameContext {
        FrameContext {
            view: self.view_matrix(),
            projection: self.projection_matrix(width, height),
            camera_position: self.position,
            near_plane: self.near,
            light,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_view_undoes_placement() {
        let camera = Camera {
            position: Vec3::new(3.0, -2.0, 7.0),
            yaw: 35.0,
            pitch: -20.0,
            ..Camera::default()
        };
        let p = Vec3::new(0.5, 1.0, -4.0);
        let round_trip = camera
            .view_matrix()
            .transform_point(camera.world_matrix().transform_point(p));
        assert!(close(round_trip, p));
    }

    #[test]
    fn test_point_ahead_lands_on_view_axis() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 90.0,
            pitch: 0.0,
            ..Camera::default()
        };
        // Yaw 90 looks down -X
        assert!(close(camera.forward(), -Vec3::X));
        let ahead = camera.position + camera.forward() * 5.0;
        let in_view = camera.view_matrix().transform_point(ahead);
        assert!(close(in_view, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_default_looks_down_at_origin() {
        let camera = Camera::default();
        assert!(camera.forward().y < 0.0);
        let origin = camera.view_matrix().transform_point(Vec3::ZERO);
        assert!(origin.z > camera.near);
    }

    #[test]
    fn test_turn_clamps_pitch() {
        let mut camera = Camera::default();
        camera.turn(10.0, 500.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.turn(0.0, -1000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
        assert_eq!(camera.yaw, 10.0);
    }

    #[test]
    fn test_fly_follows_heading() {
        let mut camera = Camera {
            position: Vec3::ZERO,
            pitch: 0.0,
            ..Camera::default()
        };
        camera.fly(2.0, 0.0, 0.0);
        assert!(close(camera.position, Vec3::new(0.0, 0.0, 2.0)));
        camera.fly(0.0, 1.0, 0.5);
        assert!(close(camera.position, Vec3::new(1.0, 0.5, 2.0)));
    }

    #[test]
    fn test_frame_context_uses_height_over_width() {
        let camera = Camera::default();
        let frame = camera.frame_context(200, 100, Light::default());
        assert_eq!(frame.camera_position, camera.position);
        assert_eq!(frame.near_plane, camera.near);
        let p = frame.projection.m;
        assert!((p[0][0] - p[1][1] * 0.5).abs() < 1e-6);
    }
}

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

//! Skybox pass
//!
//! Runs after all geometry. Every pixel whose depth is still at the clear
//! value gets the cube map colour seen through it. Depth is left untouched.
//!
//! The view ray for pixel `(x, y)` is rebuilt from the camera basis stored in
//! the view matrix:
//!
//! ```text
//! ndc_x = 2x / W - 1
//! ndc_y = 1 - 2y / H
//! dir   = ndc_x * tan_x * right + ndc_y * tan_y * up + forward
//! ```
//!
//! where `right`, `up` and `forward` are the first three columns of the view
//! matrix and `tan_x = 1 / P[0][0]`, `tan_y = 1 / P[1][1]`.

use super::cubemap::{CubeFace, Cubemap};
use crate::core::error::Result;
use crate::core::math::Vec3;
use crate::core::raster::color::lerp_color;
use crate::core::raster::shader::FrameContext;
use crate::core::raster::FrameBuffer;

const ZENITH: u32 = 0xFF10_1838;
const HORIZON: u32 = 0xFF3A_2850;
const NADIR: u32 = 0xFF04_0408;

/// Cube map drawn behind the scene
#[derive(Debug, Clone)]
pub struct Skybox {
    cubemap: Cubemap,
}

impl Skybox {
    pub fn new(cubemap: Cubemap) -> Self {
        Self { cubemap }
    }

    /// Built-in gradient sky, used when no face images are configured
    pub fn procedural(size: u32) -> Result<Self> {
        let cubemap = Cubemap::from_fn(size, |face: CubeFace, u, v| {
            let elevation = face.direction(u, v).normalize().y;
            if elevation >= 0.0 {
                lerp_color(HORIZON, ZENITH, elevation)
            } else {
                lerp_color(HORIZON, NADIR, -elevation)
            }
        })?;
        Ok(Self::new(cubemap))
    }

    pub fn cubemap(&self) -> &Cubemap {
        &self.cubemap
    }

    /// Fill every uncovered pixel of `fb`
    ///
    /// Does nothing unless all six faces are loaded.
    pub fn render(&self, fb: &mut FrameBuffer, frame: &FrameContext) {
        if !self.cubemap.is_loaded() {
            log::debug!("Skybox skipped: cube map incomplete");
            return;
        }

        let view = &frame.view;
        let right = view.column(0).xyz();
        let up = view.column(1).xyz();
        let forward = view.column(2).xyz();
        let tan_x = 1.0 / frame.projection.m[0][0];
        let tan_y = 1.0 / frame.projection.m[1][1];

        let (width, height) = (fb.width(), fb.height());
        for y in 0..height as i32 {
            let ndc_y = 1.0 - 2.0 * y as f32 / height as f32;
            for x in 0..width as i32 {
                if !fb.is_uncovered(x, y) {
                    continue;
                }
                let ndc_x = 2.0 * x as f32 / width as f32 - 1.0;
                let dir: Vec3 = right * (ndc_x * tan_x) + up * (ndc_y * tan_y) + forward;
                fb.write_color(x, y, self.cubemap.sample(dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Mat4;
    use crate::core::raster::DEPTH_FAR;

    fn face_colored() -> Skybox {
        let cubemap = Cubemap::from_fn(4, |face, _, _| 0xFF00_0000 | (face.index() as u32 + 1))
            .expect("valid");
        Skybox::new(cubemap)
    }

    fn frame(view: Mat4) -> FrameContext {
        FrameContext {
            view,
            projection: Mat4::perspective(90.0, 1.0, 0.1, 10.0),
            ..FrameContext::identity(8, 8)
        }
    }

    #[test]
    fn test_centre_pixel_looks_forward() {
        let sky = face_colored();
        let mut fb = FrameBuffer::new(8, 8);
        sky.render(&mut fb, &frame(Mat4::identity()));
        // Identity view looks down +Z
        assert_eq!(fb.color_at(4, 4), Some(0xFF00_0000 | 5));
    }

    #[test]
    fn test_turned_camera_sees_other_face() {
        let sky = face_colored();
        let mut fb = FrameBuffer::new(8, 8);
        // Camera yawed 90 degrees looks down -X
        let view = Mat4::rotation_y(90.0).rigid_inverse();
        sky.render(&mut fb, &frame(view));
        assert_eq!(fb.color_at(4, 4), Some(0xFF00_0000 | 2));
    }

    #[test]
    fn test_covered_pixels_and_depth_untouched() {
        let sky = face_colored();
        let mut fb = FrameBuffer::new(8, 8);
        fb.clear(0xFF12_3456);
        assert!(fb.write_pixel(2, 2, 0.5, 0xFFAB_CDEF));
        sky.render(&mut fb, &frame(Mat4::identity()));

        assert_eq!(fb.color_at(2, 2), Some(0xFFAB_CDEF));
        assert_eq!(fb.depth_at(2, 2), Some(0.5));
        assert_ne!(fb.color_at(3, 3), Some(0xFF12_3456));
        assert_eq!(fb.depth_at(3, 3), Some(DEPTH_FAR));
    }

    #[test]
    fn test_incomplete_cubemap_draws_nothing() {
        let sky = Skybox::new(Cubemap::new());
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(0xFF12_3456);
        sky.render(&mut fb, &frame(Mat4::identity()));
        assert!(fb.pixels().iter().all(|&p| p == 0xFF12_3456));
    }

    #[test]
    fn test_procedural_sky_is_complete() {
        let sky = Skybox::procedural(8).expect("valid");
        assert!(sky.cubemap().is_loaded());
        let up = sky.cubemap().sample(Vec3::Y);
        let down = sky.cubemap().sample(-Vec3::Y);
        assert_ne!(up, down);
    }
}

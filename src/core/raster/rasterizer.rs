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

//! Software Rasterizer
//!
//! This module fills screen-space triangles and draws lines into a
//! [`FrameBuffer`]. Geometry arrives already transformed, clipped and culled
//! by the [`Pipeline`](super::pipeline::Pipeline).
//!
//! # Algorithm
//!
//! Triangles are filled with edge functions over their bounding box:
//!
//! 1. Compute the bounding box of the three vertices, clamped to the viewport
//! 2. For each integer pixel, evaluate the three edge functions
//! 3. Normalise each by its value at the opposite vertex to get barycentric
//!    weights
//! 4. The pixel is inside iff all three weights lie in `[0, 1]`
//! 5. Interpolate depth and UV, pick the colour, light it, and write through
//!    [`FrameBuffer::write_pixel`]
//!
//! Lines use a DDA: `max(|dx|, |dy|)` evenly spaced steps, each rounded down to
//! a pixel.
//!
//! # Limitations
//!
//! Interpolation is affine in screen space, not perspective-correct. Textures
//! on large triangles seen at a steep angle will swim.
//!
//! # References
//!
//! - [Scratchapixel: Rasterization](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation)

use super::color::modulate;
use super::framebuffer::FrameBuffer;
use super::pipeline::{ScreenLine, ScreenTriangle};
use super::vertex::Vertex;
use crate::core::math::{lerp, Vec3};
use crate::core::texture::Texture;

/// Edge normalisers smaller than this mark a degenerate triangle
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Implicit line equation through `s → e`, evaluated at `(x, y)`
///
/// Zero on the line, opposite signs on either side.
#[inline(always)]
pub fn edge_function(s: &Vertex, e: &Vertex, x: f32, y: f32) -> f32 {
    let (sx, sy) = (s.position.x, s.position.y);
    let (ex, ey) = (e.position.x, e.position.y);
    (sy - ey) * x + (ex - sx) * y + (sx * ey - sy * ex)
}

/// Per-triangle edge setup
///
/// Each weight belongs to one vertex and uses the edge opposite it,
/// normalised by the edge's value at that vertex.
#[derive(Debug, Clone, Copy)]
struct EdgeSetup {
    norm: [f32; 3],
}

impl EdgeSetup {
    fn new(v: &[Vertex; 3]) -> Option<Self> {
        let norm = [
            edge_function(&v[2], &v[1], v[0].position.x, v[0].position.y),
            edge_function(&v[0], &v[2], v[1].position.x, v[1].position.y),
            edge_function(&v[1], &v[0], v[2].position.x, v[2].position.y),
        ];
        if norm.iter().any(|n| n.abs() < DEGENERATE_EPSILON) {
            return None;
        }
        Some(Self { norm })
    }

    #[inline(always)]
    fn weights(&self, v: &[Vertex; 3], x: f32, y: f32) -> [f32; 3] {
        [
            edge_function(&v[2], &v[1], x, y) / self.norm[0],
            edge_function(&v[0], &v[2], x, y) / self.norm[1],
            edge_function(&v[1], &v[0], x, y) / self.norm[2],
        ]
    }
}

/// Barycentric weights of `(x, y)` in a screen triangle
///
/// Returns `None` for a degenerate triangle.
pub fn barycentric(v: &[Vertex; 3], x: f32, y: f32) -> Option<[f32; 3]> {
    EdgeSetup::new(v).map(|setup| setup.weights(v, x, y))
}

#[inline(always)]
fn inside(w: &[f32; 3]) -> bool {
    w.iter().all(|&c| (0.0..=1.0).contains(&c))
}

/// Inclusive pixel bounds of a screen triangle, clamped to the viewport
///
/// Returns `None` when the box misses the viewport entirely.
pub fn bounding_box(v: &[Vertex; 3], width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let xs = v.map(|p| p.position.x);
    let ys = v.map(|p| p.position.y);
    let min_x = (xs[0].min(xs[1]).min(xs[2]) as i32).max(0);
    let max_x = (xs[0].max(xs[1]).max(xs[2]) as i32).min(width as i32 - 1);
    let min_y = (ys[0].min(ys[1]).min(ys[2]) as i32).max(0);
    let max_y = (ys[0].max(ys[1]).max(ys[2]) as i32).min(height as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x, min_y, max_x, max_y))
}

/// CPU rasterizer
///
/// Stateless apart from a running count of written pixels.
///
/// # Examples
///
/// ```
/// use twinraster::core::raster::{FrameBuffer, Rasterizer, ScreenTriangle, Vertex};
/// use twinraster::core::math::Vec3;
///
/// let mut fb = FrameBuffer::new(16, 16);
/// let mut rasterizer = Rasterizer::new();
/// let tri = ScreenTriangle {
///     vertices: [
///         Vertex::new(2.0, 2.0, 0.5).with_color(0xFFFF0000),
///         Vertex::new(2.0, 12.0, 0.5),
///         Vertex::new(12.0, 2.0, 0.5),
///     ],
///     lighting: 1.0,
/// };
/// rasterizer.fill_triangle(&mut fb, &tri, None, Vec3::ONE);
/// assert_eq!(fb.color_at(4, 4), Some(0xFFFF0000));
/// ```
#[derive(Debug, Default)]
pub struct Rasterizer {
    pixels_written: u64,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels that passed the depth test since the last reset
    pub fn pixels_written(&self) -> u64 {
        self.pixels_written
    }

    pub fn reset_stats(&mut self) {
        self.pixels_written = 0;
    }

    /// Fill a screen triangle
    ///
    /// # Arguments
    ///
    /// * `fb` - Target buffers
    /// * `tri` - Screen triangle with its flat lighting factor
    /// * `texture` - Sampled at the interpolated UV; without one, vertex 0's
    ///   colour fills the triangle
    /// * `light_color` - Per-channel light tint
    pub fn fill_triangle(
        &mut self,
        fb: &mut FrameBuffer,
        tri: &ScreenTriangle,
        texture: Option<&Texture>,
        light_color: Vec3,
    ) {
        let v = &tri.vertices;
        let Some(setup) = EdgeSetup::new(v) else {
            log::trace!("Skipping degenerate triangle");
            return;
        };
        let Some((min_x, min_y, max_x, max_y)) = bounding_box(v, fb.width(), fb.height()) else {
            return;
        };

        let flat = modulate(v[0].color, tri.lighting, light_color);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let w = setup.weights(v, x as f32, y as f32);
                if !inside(&w) {
                    continue;
                }

                let z = v[0].position.z * w[0] + v[1].position.z * w[1] + v[2].position.z * w[2];
                let color = match texture {
                    Some(tex) => {
                        let u = v[0].u * w[0] + v[1].u * w[1] + v[2].u * w[2];
                        let t = v[0].v * w[0] + v[1].v * w[1] + v[2].v * w[2];
                        modulate(tex.sample(u, t), tri.lighting, light_color)
                    }
                    None => flat,
                };

                if fb.write_pixel(x, y, z, color) {
                    self.pixels_written += 1;
                }
            }
        }
    }

    /// Draw a screen line with a DDA
    ///
    /// Depth is interpolated along the line and every point goes through the
    /// depth test.
    pub fn draw_line(&mut self, fb: &mut FrameBuffer, line: &ScreenLine) {
        let (x0, y0, z0) = (line.start.position.x, line.start.position.y, line.start.position.z);
        let (x1, y1, z1) = (line.end.position.x, line.end.position.y, line.end.position.z);

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0);
        let count = steps as i32;

        for i in 0..=count {
            let t = i as f32 / steps;
            let x = lerp(x0, x1, t) as i32;
            let y = lerp(y0, y1, t) as i32;
            let z = lerp(z0, z1, t);
            if fb.write_pixel(x, y, z, line.color) {
                self.pixels_written += 1;
            }
        }
    }
}

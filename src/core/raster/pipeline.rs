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

//! Geometry stage
//!
//! Everything that happens to a primitive before it is filled:
//!
//! 1. Flat lighting factor from the world-space face normal
//! 2. Model → view ([`VertexShader::to_view`])
//! 3. Near-plane clipping ([`clip_triangle`], [`clip_line`])
//! 4. Projection and perspective divide ([`VertexShader::project`])
//! 5. Viewport mapping ([`FrameContext::to_screen`])
//! 6. Back-face culling in screen space
//!
//! Both backends call into the same [`Pipeline`], so the CPU fill and the
//! compute kernel only ever see identical screen-space primitives.

use super::clip::{clip_line, clip_triangle};
use super::shader::{FrameContext, PixelShader, Unshaded, VertexShader, WorldViewProjection};
use super::vertex::{Pixel, Vertex};
use crate::core::math::Mat4;

/// Screen-space triangle ready to fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    /// Pixel coordinates in x/y, NDC depth in z
    pub vertices: [Vertex; 3],
    /// Flat lighting factor in `[0, 1]`
    pub lighting: f32,
}

/// Screen-space line ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLine {
    pub start: Vertex,
    pub end: Vertex,
    /// Colour after the pixel stage
    pub color: u32,
}

/// Per-frame geometry counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles handed to the pipeline
    pub triangles_submitted: u32,
    /// Triangles entirely behind the near plane
    pub triangles_clipped: u32,
    /// Screen triangles rejected as back-facing or degenerate
    pub triangles_culled: u32,
    /// Screen triangles passed on to a fill stage
    pub triangles_drawn: u32,
    /// Lines passed on to a fill stage
    pub lines_drawn: u32,
    /// Texture batches dispatched (compute backend only)
    pub gpu_batches: u32,
    /// Compute passes submitted (compute backend only)
    pub gpu_dispatches: u32,
}

/// Signed area (times two) of a screen triangle
///
/// `(x1 - x0)(y2 - y0) - (y1 - y0)(x2 - x0)` with y pointing down. Triangles
/// that wind counter-clockwise on screen come out negative.
#[inline]
pub fn signed_area(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> f32 {
    let (e1x, e1y) = (v1.position.x - v0.position.x, v1.position.y - v0.position.y);
    let (e2x, e2y) = (v2.position.x - v0.position.x, v2.position.y - v0.position.y);
    e1x * e2y - e1y * e2x
}

/// Whether a screen triangle faces away from the camera
///
/// Non-negative signed area (clockwise or degenerate) is culled.
#[inline]
pub fn is_back_facing(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> bool {
    signed_area(v0, v1, v2) >= 0.0
}

/// Vertex and pixel shaders plus the fixed geometry steps between them
pub struct Pipeline {
    vertex_shader: Box<dyn VertexShader>,
    pixel_shader: Box<dyn PixelShader>,
}

impl Pipeline {
    pub fn new(vertex_shader: Box<dyn VertexShader>, pixel_shader: Box<dyn PixelShader>) -> Self {
        Self {
            vertex_shader,
            pixel_shader,
        }
    }

    pub fn set_vertex_shader(&mut self, shader: Box<dyn VertexShader>) {
        self.vertex_shader = shader;
    }

    pub fn set_pixel_shader(&mut self, shader: Box<dyn PixelShader>) {
        self.pixel_shader = shader;
    }

    /// Run one model-space triangle through the geometry stage
    ///
    /// `emit` is called once per surviving screen triangle (zero, one or two
    /// times, depending on clipping and culling).
    pub fn process_triangle(
        &self,
        frame: &FrameContext,
        world: &Mat4,
        triangle: &[Vertex; 3],
        stats: &mut FrameStats,
        mut emit: impl FnMut(ScreenTriangle),
    ) {
        stats.triangles_submitted += 1;

        let lighting = frame.light.triangle_factor(
            world.transform_point(triangle[0].point()),
            world.transform_point(triangle[1].point()),
            world.transform_point(triangle[2].point()),
        );

        let vs = self.vertex_shader.as_ref();
        let view = triangle.map(|v| vs.to_view(&v, world, frame));

        let mut finish = |tri: &[Vertex; 3]| {
            let screen = tri.map(|v| frame.to_screen(&vs.project(&v, frame)));
            if is_back_facing(&screen[0], &screen[1], &screen[2]) {
                stats.triangles_culled += 1;
                log::trace!("Culled back-facing triangle");
                return;
            }
            stats.triangles_drawn += 1;
            emit(ScreenTriangle {
                vertices: screen,
                lighting,
            });
        };

        if vs.clips_near_plane() {
            let clipped = clip_triangle(&view, frame.near_plane);
            if clipped.is_empty() {
                stats.triangles_clipped += 1;
                return;
            }
            for tri in clipped.iter() {
                finish(tri);
            }
        } else {
            finish(&view);
        }
    }

    /// Run one model-space line through the geometry stage
    ///
    /// The pixel shader resolves the line colour once, at the start pixel.
    pub fn process_line(
        &self,
        frame: &FrameContext,
        world: &Mat4,
        start: &Vertex,
        end: &Vertex,
        color: u32,
        stats: &mut FrameStats,
    ) -> Option<ScreenLine> {
        let vs = self.vertex_shader.as_ref();
        let a = vs.to_view(start, world, frame);
        let b = vs.to_view(end, world, frame);

        let (a, b) = if vs.clips_near_plane() {
            clip_line(&a, &b, frame.near_plane)?
        } else {
            (a, b)
        };

        let a = frame.to_screen(&vs.project(&a, frame));
        let b = frame.to_screen(&vs.project(&b, frame));
        let shaded = self.pixel_shader.shade(Pixel::new(
            a.position.x as i32,
            a.position.y as i32,
            color,
        ));

        stats.lines_drawn += 1;
        Some(ScreenLine {
            start: a,
            end: b,
            color: shaded.color,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(WorldViewProjection), Box::new(Unshaded))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("clips_near_plane", &self.vertex_shader.clips_near_plane())
            .finish_non_exhaustive()
    }
}

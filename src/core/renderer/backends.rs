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

//! [`RenderBackend`] implementations
//!
//! Both run the shared [`Pipeline`] first. The scalar backend fills each
//! surviving screen primitive immediately; the parallel backend queues it
//! into the compute rasterizer's batches for one dispatch round at the end
//! of the frame.

use crate::core::gpu::GpuRasterizer;
use crate::core::math::Mat4;
use crate::core::raster::{FrameBuffer, FrameContext, FrameStats, Pipeline, Rasterizer, Vertex};
use crate::core::scene::{BackendKind, RenderBackend};
use crate::core::texture::{TextureHandle, TextureStore};

/// CPU fill, in submission order
pub struct ScalarBackend<'a> {
    pipeline: &'a Pipeline,
    rasterizer: &'a mut Rasterizer,
    fb: &'a mut FrameBuffer,
    frame: &'a FrameContext,
    textures: &'a TextureStore,
    stats: &'a mut FrameStats,
}

impl<'a> ScalarBackend<'a> {
    pub fn new(
        pipeline: &'a Pipeline,
        rasterizer: &'a mut Rasterizer,
        fb: &'a mut FrameBuffer,
        frame: &'a FrameContext,
        textures: &'a TextureStore,
        stats: &'a mut FrameStats,
    ) -> Self {
        Self {
            pipeline,
            rasterizer,
            fb,
            frame,
            textures,
            stats,
        }
    }
}

impl RenderBackend for ScalarBackend<'_> {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn submit_triangle(
        &mut self,
        world: &Mat4,
        vertices: [Vertex; 3],
        texture: Option<TextureHandle>,
    ) {
        let texture = texture.and_then(|handle| self.textures.get(handle));
        let light_color = self.frame.light.color;
        let rasterizer = &mut *self.rasterizer;
        let fb = &mut *self.fb;
        self.pipeline
            .process_triangle(self.frame, world, &vertices, self.stats, |tri| {
                rasterizer.fill_triangle(fb, &tri, texture, light_color);
            });
    }

    fn submit_line(&mut self, world: &Mat4, start: Vertex, end: Vertex, color: u32) {
        if let Some(line) =
            self.pipeline
                .process_line(self.frame, world, &start, &end, color, self.stats)
        {
            self.rasterizer.draw_line(self.fb, &line);
        }
    }
}

/// Compute-shader fill, batched by texture
pub struct ParallelBackend<'a> {
    pipeline: &'a Pipeline,
    gpu: &'a mut GpuRasterizer,
    frame: &'a FrameContext,
    stats: &'a mut FrameStats,
}

impl<'a> ParallelBackend<'a> {
    pub fn new(
        pipeline: &'a Pipeline,
        gpu: &'a mut GpuRasterizer,
        frame: &'a FrameContext,
        stats: &'a mut FrameStats,
    ) -> Self {
        Self {
            pipeline,
            gpu,
            frame,
            stats,
        }
    }
}

impl RenderBackend for ParallelBackend<'_> {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpu
    }

    fn submit_triangle(
        &mut self,
        world: &Mat4,
        vertices: [Vertex; 3],
        texture: Option<TextureHandle>,
    ) {
        let gpu = &mut *self.gpu;
        self.pipeline
            .process_triangle(self.frame, world, &vertices, self.stats, |tri| {
                gpu.submit_triangle(&tri, texture);
            });
    }

    fn submit_line(&mut self, world: &Mat4, start: Vertex, end: Vertex, color: u32) {
        if let Some(line) =
            self.pipeline
                .process_line(self.frame, world, &start, &end, color, self.stats)
        {
            self.gpu.submit_line(&line);
        }
    }
}
